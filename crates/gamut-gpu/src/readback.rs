//! GPU-to-CPU readback of remapped images.

use std::sync::mpsc;

use gamut_core::GamutImage;

use crate::buffers::GpuImageHandle;
use crate::error::GpuError;

/// Download a GPU image buffer back to a [`GamutImage`]. Blocks until complete.
///
/// `staging_cache` is reused across calls and grown when too small.
pub fn download_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    handle: &GpuImageHandle,
    staging_cache: &mut Option<wgpu::Buffer>,
) -> Result<GamutImage, GpuError> {
    let size = handle.byte_size();
    if staging_cache.as_ref().is_some_and(|buf| buf.size() < size) {
        *staging_cache = None;
    }
    let staging = staging_cache.get_or_insert_with(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gamut_image_staging"),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        })
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("gamut_image_download_encoder"),
    });
    encoder.copy_buffer_to_buffer(&handle.buffer, 0, staging, 0, size);
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..size);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::PollType::wait_indefinitely())?;
    rx.recv().map_err(|_| GpuError::MapCallbackDropped)??;

    let pixels = slice.get_mapped_range().to_vec();
    staging.unmap();

    Ok(GamutImage {
        width: handle.width,
        height: handle.height,
        pixels,
    })
}
