//! Gamut GPU: wgpu compute pipeline for per-pixel gamut remapping.
//!
//! This crate owns all GPU resources. It runs the same OKLab math and the
//! same six-value matrix as `gamut_core::remap`, one invocation per pixel.

pub mod buffers;
pub mod error;
pub mod pipeline;
pub mod readback;

use gamut_core::AffineMatrix;

pub use error::GpuError;
pub use pipeline::GpuGamutRemapper;

/// WGSL source of the remap kernel.
pub const REMAP_SHADER: &str = include_str!("../shaders/remap_gamut.wgsl");

/// Device features the remap pipeline needs.
pub fn required_features() -> wgpu::Features {
    wgpu::Features::empty()
}

/// Uniform layout of [`AffineMatrix`] for `remap_gamut.wgsl`.
///
/// Padded to 32 bytes so the uniform block size is a multiple of 16.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GamutMatrixGpu {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
    pub _pad: [f32; 2],
}

impl GamutMatrixGpu {
    pub fn from_matrix(m: &AffineMatrix) -> Self {
        Self {
            a: m.a,
            b: m.b,
            c: m.c,
            d: m.d,
            tx: m.tx,
            ty: m.ty,
            _pad: [0.0; 2],
        }
    }
}
