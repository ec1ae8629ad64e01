//! Compute pipeline that remaps every pixel of an image through the gamut matrix.

use std::num::NonZeroU64;
use std::sync::Arc;

use gamut_core::{AffineMatrix, GamutImage, MatrixSlot};
use tracing::{debug, info};

use crate::buffers::{DimensionsGpu, GpuImageHandle};
use crate::error::GpuError;
use crate::{GamutMatrixGpu, REMAP_SHADER, readback};

/// Workgroup edge length; must match `@workgroup_size` in `remap_gamut.wgsl`.
const WORKGROUP_SIZE: u32 = 8;

/// GPU twin of [`gamut_core::remap::remap_image`].
///
/// Holds the compiled pipeline plus cached source, output, and staging
/// buffers. Buffers are reallocated only when the image dimensions change.
pub struct GpuGamutRemapper {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    matrix_buffer: wgpu::Buffer,
    dims_buffer: wgpu::Buffer,
    source: Option<GpuImageHandle>,
    output: Option<GpuImageHandle>,
    staging: Option<wgpu::Buffer>,
}

impl GpuGamutRemapper {
    /// Compile `remap_gamut.wgsl` on an existing device.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gamut_remap_shader"),
            source: wgpu::ShaderSource::Wgsl(REMAP_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gamut_remap_layout"),
            entries: &[
                storage_ro_entry(0, 4),
                storage_rw_entry(1, 4),
                uniform_entry(2, std::mem::size_of::<GamutMatrixGpu>() as u64),
                uniform_entry(3, std::mem::size_of::<DimensionsGpu>() as u64),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("gamut_remap_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("gamut_remap_pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("remap_gamut"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        let matrix_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gamut_remap_matrix"),
            size: std::mem::size_of::<GamutMatrixGpu>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let dims_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gamut_remap_dims"),
            size: std::mem::size_of::<DimensionsGpu>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            matrix_buffer,
            dims_buffer,
            source: None,
            output: None,
            staging: None,
        }
    }

    /// Request a default adapter and device without a surface.
    pub fn create_headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            ..Default::default()
        }))?;
        let info = adapter.get_info();
        info!(adapter = %info.name, backend = ?info.backend, "GPU adapter selected");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("gamut_device"),
            required_features: crate::required_features(),
            required_limits: adapter.limits(),
            ..Default::default()
        }))?;

        Ok(Self::new(Arc::new(device), Arc::new(queue)))
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    /// Upload the source image, replacing any previous one. An empty image
    /// clears the source.
    ///
    /// The output buffer is reallocated when the dimensions change.
    pub fn upload_image(&mut self, image: &GamutImage) -> Result<(), GpuError> {
        if image.is_empty() {
            self.source = None;
            return Ok(());
        }
        self.check_limits(image.width, image.height)?;
        let source = GpuImageHandle::upload(&self.device, image);

        let reuse_output = self
            .output
            .as_ref()
            .is_some_and(|out| out.same_dimensions(image.width, image.height));
        if !reuse_output {
            self.output = Some(GpuImageHandle::create_output(
                &self.device,
                image.width,
                image.height,
            ));
        }

        self.queue.write_buffer(
            &self.dims_buffer,
            0,
            bytemuck::bytes_of(&DimensionsGpu::new(image.width, image.height)),
        );
        debug!(width = image.width, height = image.height, "uploaded source image");
        self.source = Some(source);
        Ok(())
    }

    /// Record and submit one remap pass over the uploaded image.
    ///
    /// Does nothing when no image has been uploaded.
    pub fn dispatch(&mut self, matrix: &AffineMatrix) {
        let (Some(source), Some(output)) = (&self.source, &self.output) else {
            return;
        };

        self.queue.write_buffer(
            &self.matrix_buffer,
            0,
            bytemuck::bytes_of(&GamutMatrixGpu::from_matrix(matrix)),
        );

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gamut_remap_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: source.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.matrix_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.dims_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gamut_remap_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("gamut_remap_pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(
                source.width.div_ceil(WORKGROUP_SIZE),
                source.height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Read the last dispatch result back. Returns an empty image when
    /// nothing has been uploaded.
    pub fn download(&mut self) -> Result<GamutImage, GpuError> {
        match &self.output {
            Some(output) if self.source.is_some() => {
                readback::download_image(&self.device, &self.queue, output, &mut self.staging)
            }
            _ => Ok(GamutImage::empty()),
        }
    }

    /// Upload, dispatch, and download in one call.
    pub fn remap(
        &mut self,
        image: &GamutImage,
        matrix: &AffineMatrix,
    ) -> Result<GamutImage, GpuError> {
        if image.is_empty() {
            return Ok(GamutImage::empty());
        }
        self.upload_image(image)?;
        self.dispatch(matrix);
        let out = self.download()?;
        debug!(pixels = image.pixel_count(), "gpu remap complete");
        Ok(out)
    }

    /// Remap with whatever matrix is currently published in `slot`.
    ///
    /// The matrix is read once before dispatch so the whole frame uses a
    /// single generation. Returns that generation with the image.
    pub fn remap_published(
        &mut self,
        image: &GamutImage,
        slot: &MatrixSlot,
    ) -> Result<(GamutImage, u64), GpuError> {
        let snapshot = slot.snapshot();
        let out = self.remap(image, &snapshot.matrix)?;
        Ok((out, snapshot.generation))
    }

    fn check_limits(&self, width: u32, height: u32) -> Result<(), GpuError> {
        let limits = self.device.limits();
        let groups_x = width.div_ceil(WORKGROUP_SIZE);
        let groups_y = height.div_ceil(WORKGROUP_SIZE);
        let bytes = width as u64 * height as u64 * crate::buffers::BYTES_PER_PIXEL;
        if groups_x > limits.max_compute_workgroups_per_dimension
            || groups_y > limits.max_compute_workgroups_per_dimension
            || bytes > limits.max_storage_buffer_binding_size as u64
            || bytes > limits.max_buffer_size
        {
            return Err(GpuError::ImageTooLarge { width, height });
        }
        Ok(())
    }
}

fn storage_ro_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}

fn storage_rw_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: false },
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}

fn uniform_entry(binding: u32, min_size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}
