//! Gamut Core: domain layer for chroma-plane gamut exploration.
//!
//! This crate contains the OKLab color math, convex hull, display
//! coordinate mapping, gamut transform, and host-side pixel remapping.
//! No GPU or framework dependencies.

pub mod color;
pub mod error;
pub mod geometry;
pub mod image;
pub mod pigments;
pub mod remap;
pub mod sampling;
pub mod session;
pub mod transform;
pub mod wheel;

// Re-exports for convenience.
pub use color::oklab::{Oklab, to_perceptual, to_rgb};
pub use error::GamutError;
pub use geometry::ab::Ab;
pub use geometry::coords::{Viewport, from_display_delta, to_display};
pub use geometry::hull::convex_hull;
pub use image::GamutImage;
pub use session::{GamutFrame, GamutSession, InputEvent, OpMode};
pub use transform::gamut::{GamutTransform, Modifiers, TransformState};
pub use transform::matrix::{AffineMatrix, MatrixSlot};
