//! Host-side pixel remapping through the gamut matrix.
//!
//! For each pixel:
//! ```text
//!   RGBA8 ──→ /255 ──→ OKLab ──→ (a, b) × matrix ──→ sRGB ──→ round ──→ RGBA8
//!                        L ─────────────────────────↗        alpha unchanged
//! ```
//!
//! [`remap_pixel`] is the CPU twin of `remap_gamut.wgsl` in `gamut-gpu`.
//! Rows are processed in parallel with rayon; pixels have no cross
//! dependencies.

use rayon::prelude::*;
use tracing::debug;

use crate::color::oklab::{self, quantize};
use crate::image::GamutImage;
use crate::transform::matrix::AffineMatrix;

/// Remap one RGBA8 pixel. Alpha passes through untouched.
#[inline]
pub fn remap_pixel(px: [u8; 4], matrix: &AffineMatrix) -> [u8; 4] {
    let rgb = [px[0], px[1], px[2]].map(|c| c as f32 / 255.0);
    let lab = matrix.apply_lab(oklab::from_unit_rgb(rgb));
    let [r, g, b] = oklab::to_unit_rgb(lab).map(quantize);
    [r, g, b, px[3]]
}

/// Remap every pixel of `image`, rows in parallel.
pub fn remap_image(image: &GamutImage, matrix: &AffineMatrix) -> GamutImage {
    let mut out = image.clone();
    remap_in_place(&mut out, matrix);
    out
}

/// Remap `image` in place, rows in parallel.
pub fn remap_in_place(image: &mut GamutImage, matrix: &AffineMatrix) {
    if image.is_empty() {
        return;
    }
    debug!(
        width = image.width,
        height = image.height,
        "remapping image on host"
    );
    let row_bytes = image.width as usize * 4;
    image
        .pixels
        .par_chunks_mut(row_bytes)
        .for_each(|row| remap_row(row, matrix));
}

/// Single-threaded variant of [`remap_image`].
pub fn remap_image_serial(image: &GamutImage, matrix: &AffineMatrix) -> GamutImage {
    let mut out = image.clone();
    remap_row(&mut out.pixels, matrix);
    out
}

fn remap_row(bytes: &mut [u8], matrix: &AffineMatrix) {
    for px in bytes.chunks_exact_mut(4) {
        let mapped = remap_pixel([px[0], px[1], px[2], px[3]], matrix);
        px.copy_from_slice(&mapped);
    }
}

/// Rec. 601 luma grayscale. Alpha passes through.
pub fn grayscale(image: &GamutImage) -> GamutImage {
    let mut out = image.clone();
    out.pixels.par_chunks_exact_mut(4).for_each(|px| {
        let [r, g, b] = [px[0], px[1], px[2]].map(|c| c as f32 / 255.0);
        let gray = quantize(0.299 * r + 0.587 * g + 0.114 * b);
        px[..3].fill(gray);
    });
    out
}
