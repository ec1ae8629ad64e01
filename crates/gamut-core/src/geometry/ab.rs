//! Chroma-plane point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::oklab::Oklab;

/// A point in the OKLab chroma plane, with optional lightness.
///
/// Equality compares the `(a, b)` coordinates only; lightness is carried
/// along as metadata.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ab {
    pub a: f32,
    pub b: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f32>,
}

impl Ab {
    pub const ORIGIN: Ab = Ab::new(0.0, 0.0);

    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b, l: None }
    }

    pub const fn with_lightness(a: f32, b: f32, l: f32) -> Self {
        Self { a, b, l: Some(l) }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.a, self.b)
    }
}

impl PartialEq for Ab {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl From<Vec2> for Ab {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Oklab> for Ab {
    fn from(lab: Oklab) -> Self {
        Self::with_lightness(lab.a, lab.b, lab.l)
    }
}
