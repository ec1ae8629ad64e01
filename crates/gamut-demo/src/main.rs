//! Headless gamut demo.
//!
//! Loads an image, replays a scripted list of pointer and wheel events
//! against a [`GamutSession`], remaps the image with the resulting matrix,
//! and writes `remapped.png` plus `report.json` to the output directory.

mod config;
mod error;
mod image_loader;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gamut_core::remap::remap_image;
use gamut_core::{GamutImage, GamutSession, InputEvent, Viewport};
use gamut_gpu::GpuGamutRemapper;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::report::{Backend, DemoReport};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GAMUT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args_os().skip(1);
    let input = args.next().map(PathBuf::from).ok_or(DemoError::Usage)?;
    let output_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
    let config = DemoConfig::default();
    info!(?config, input = %input.display(), "starting");

    let image = image_loader::load_image(&input)?;
    let mut session = GamutSession::new(Viewport::new(config.width, config.height));
    session.set_mode(config.mode);
    session.set_pigment_visibility(config.show_pigments, config.show_pigments);
    session.set_image(&image);

    let events = match &config.events {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };
    for event in &events {
        session.handle(*event);
    }
    info!(
        events = events.len(),
        state = ?session.transform().state(),
        "events replayed"
    );

    let (remapped, backend) = remap(&image, &session, config.use_gpu);

    std::fs::create_dir_all(&output_dir).map_err(|source| DemoError::Write {
        path: output_dir.clone(),
        source,
    })?;
    let image_path = output_dir.join("remapped.png");
    image_loader::save_image(remapped, &image_path)?;

    let report_path = output_dir.join("report.json");
    let report = DemoReport::from_session(&session, backend);
    let json = serde_json::to_string_pretty(&report).map_err(DemoError::Report)?;
    std::fs::write(&report_path, json).map_err(|source| DemoError::Write {
        path: report_path.clone(),
        source,
    })?;

    info!(
        image = %image_path.display(),
        report = %report_path.display(),
        ?backend,
        "done"
    );
    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<InputEvent>, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(DemoError::Events)
}

/// Remap with the session's published matrix, on the GPU when enabled and
/// available, otherwise on the host.
fn remap(image: &GamutImage, session: &GamutSession, use_gpu: bool) -> (GamutImage, Backend) {
    let slot = session.matrix_slot();
    if use_gpu {
        let result = GpuGamutRemapper::create_headless()
            .and_then(|mut remapper| remapper.remap_published(image, &slot));
        match result {
            Ok((out, generation)) => {
                info!(generation, "remapped on GPU");
                return (out, Backend::Gpu);
            }
            Err(err) => warn!("GPU remap unavailable, using CPU: {err}"),
        }
    }
    let snapshot = slot.snapshot();
    info!(generation = snapshot.generation, "remapped on CPU");
    (remap_image(image, &snapshot.matrix), Backend::Cpu)
}

#[cfg(test)]
mod tests {
    use gamut_core::Modifiers;

    use super::*;

    #[test]
    fn test_bundled_event_script_parses() {
        let events: Vec<InputEvent> =
            serde_json::from_str(include_str!("../events/drag-and-rotate.json")).expect("parse");
        assert_eq!(events.len(), 8);
        assert_eq!(events[0], InputEvent::PointerDown { x: 400.0, y: 400.0 });
        assert_eq!(
            events[6],
            InputEvent::Wheel {
                delta_y: 120.0,
                modifiers: Modifiers::SHIFT,
            }
        );
    }

    #[test]
    fn test_cpu_fallback_uses_published_matrix() {
        let mut session = GamutSession::new(Viewport::default());
        session.handle(InputEvent::PointerDown { x: 400.0, y: 400.0 });
        session.handle(InputEvent::PointerMove { x: 436.0, y: 400.0 });
        let image = GamutImage {
            width: 1,
            height: 1,
            pixels: vec![128, 128, 128, 255],
        };
        let (out, backend) = remap(&image, &session, false);
        assert_eq!(backend, Backend::Cpu);
        assert_eq!(out, remap_image(&image, &session.matrix()));
        // A pure +a shift turns neutral gray reddish.
        assert!(out.pixels[0] > out.pixels[1]);
    }
}
