//! GPU buffer management for the remap pipeline.

use gamut_core::GamutImage;
use wgpu::util::DeviceExt;

/// Bytes per packed RGBA8 pixel.
pub const BYTES_PER_PIXEL: u64 = 4;

/// Handle to a GPU image stored as a storage buffer of packed RGBA8 `u32`s.
pub struct GpuImageHandle {
    pub buffer: wgpu::Buffer,
    pub width: u32,
    pub height: u32,
}

impl GpuImageHandle {
    /// Upload a [`GamutImage`] to the GPU as a storage buffer.
    ///
    /// The RGBA8 bytes are uploaded as-is; on the GPU each pixel reads as
    /// one little-endian `u32` with red in the low byte.
    pub fn upload(device: &wgpu::Device, image: &GamutImage) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gamut_image_upload"),
            contents: &image.pixels,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            width: image.width,
            height: image.height,
        }
    }

    /// Create an uninitialized GPU image buffer for output.
    pub fn create_output(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gamut_image_output"),
            size: byte_size(width, height),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Buffer size in bytes.
    pub fn byte_size(&self) -> u64 {
        byte_size(self.width, self.height)
    }

    pub fn same_dimensions(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

fn byte_size(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * BYTES_PER_PIXEL
}

/// Uniform carrying the image dimensions, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DimensionsGpu {
    pub width: u32,
    pub height: u32,
    pub _pad: [u32; 2],
}

impl DimensionsGpu {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            _pad: [0; 2],
        }
    }
}
