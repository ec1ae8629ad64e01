//! Gamut transform: interactive state and the shared affine matrix.
//!
//! `GamutTransform` is the single producer of [`AffineMatrix`]. The hull
//! drawing path and the pixel remap path both consume the published
//! matrix; neither recomputes it.

pub mod gamut;
pub mod matrix;
