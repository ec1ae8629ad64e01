//! Runtime configuration for the demo.

use std::path::PathBuf;

use gamut_core::OpMode;
use tracing::warn;

/// Default viewport width.
const DEFAULT_WIDTH: f32 = 800.0;
/// Default viewport height.
const DEFAULT_HEIGHT: f32 = 800.0;

/// Runtime configuration for the gamut demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Viewport width in display units.
    pub width: f32,
    /// Viewport height in display units.
    pub height: f32,
    pub mode: OpMode,
    /// Remap on the GPU, falling back to the host path if no adapter exists.
    pub use_gpu: bool,
    /// JSON file holding the input events to replay.
    pub events: Option<PathBuf>,
    /// Include the pigment gamut and marks in the report frame.
    pub show_pigments: bool,
}

impl DemoConfig {
    /// Build a config from a variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let dimension = |key: &str, default: f32| {
            get(key)
                .and_then(|s| s.parse::<f32>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };
        let mode = match get("GAMUT_MODE") {
            Some(s) => s.parse().unwrap_or_else(|err| {
                warn!("{err}; using {}", OpMode::default());
                OpMode::default()
            }),
            None => OpMode::default(),
        };
        Self {
            width: dimension("GAMUT_VIEWPORT_WIDTH", DEFAULT_WIDTH),
            height: dimension("GAMUT_VIEWPORT_HEIGHT", DEFAULT_HEIGHT),
            mode,
            use_gpu: get("GAMUT_USE_GPU").is_none_or(|s| is_truthy(&s)),
            events: get("GAMUT_EVENTS").map(PathBuf::from),
            show_pigments: get("GAMUT_SHOW_PIGMENTS").is_some_and(|s| is_truthy(&s)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "off" | "no")
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
