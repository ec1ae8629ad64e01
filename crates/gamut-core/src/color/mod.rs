//! Color math: sRGB transfer curve, OKLab, and OKLCh conversions.
//!
//! Everything here is pure and reentrant. The same formulas and constants
//! are mirrored in the `gamut-gpu` remap shader; keep both in step.

pub mod oklab;
pub mod transfer;
