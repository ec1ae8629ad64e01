use std::path::PathBuf;

use crate::image_loader::ImageLoadError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("usage: gamut-demo <input-image> [output-dir]")]
    Usage,
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid event script: {0}")]
    Events(serde_json::Error),
    #[error("failed to serialize report: {0}")]
    Report(serde_json::Error),
}
