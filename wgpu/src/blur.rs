//! Hardware blur rendering.
//!
//! The blur runs as six render passes ping-ponging between two textures:
//! three successive box blurs, each split into a horizontal and a vertical
//! pass. The final pass lands in a texture that is copied into a mappable
//! buffer for readback.
use crate::core::Size;
use crate::graphics::blur::ITERATIONS;

use std::borrow::Cow;
use wgpu::util::DeviceExt;

/// The texture format of every blur texture.
///
/// It matches the premultiplied RGBA bytes of a
/// [`PixelBuffer`](crate::core::PixelBuffer).
pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Uniform data for the blur shader.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
struct Params {
    /// (1, 0) for a horizontal pass, (0, 1) for a vertical one
    direction: [i32; 2],
    /// Half-width of the box, in texels
    radius: i32,
    _padding: i32,
}

/// A blur direction, with its own uniforms.
#[derive(Debug)]
struct Pass {
    direction: [i32; 2],
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Pipeline for rendering box blur passes.
#[derive(Debug)]
pub struct Pipeline {
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    horizontal: Pass,
    vertical: Pass,
}

impl Pipeline {
    /// Creates a new blur pipeline.
    pub fn new(device: &wgpu::Device) -> Self {
        let constant_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blurring_wgpu.blur.constant_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blurring_wgpu.blur.texture_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blurring_wgpu.blur.pipeline_layout"),
            bind_group_layouts: &[&constant_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blurring_wgpu.blur.shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shader/blur.wgsl"))),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blurring_wgpu.blur.pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Cw,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pass = |label: &'static str, direction: [i32; 2]| {
            let uniforms = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&Params {
                    direction,
                    radius: 0,
                    _padding: 0,
                }),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("blurring_wgpu.blur.constant_bind_group"),
                layout: &constant_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                }],
            });

            Pass {
                direction,
                uniforms,
                bind_group,
            }
        };

        let horizontal = pass("blurring_wgpu.blur.horizontal_uniforms", [1, 0]);
        let vertical = pass("blurring_wgpu.blur.vertical_uniforms", [0, 1]);

        Self {
            pipeline,
            texture_layout,
            horizontal,
            vertical,
        }
    }

    /// Updates the half-width of the box used by every pass.
    pub fn set_box_radius(&self, queue: &wgpu::Queue, radius: u32) {
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);

        for pass in [&self.horizontal, &self.vertical] {
            queue.write_buffer(
                &pass.uniforms,
                0,
                bytemuck::bytes_of(&Params {
                    direction: pass.direction,
                    radius,
                    _padding: 0,
                }),
            );
        }
    }

    /// Performs a single blur pass (horizontal or vertical).
    fn blur_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        source: &wgpu::BindGroup,
        target: &wgpu::TextureView,
        pass: &Pass,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blurring_wgpu.blur.render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &pass.bind_group, &[]);
        render_pass.set_bind_group(1, source, &[]);
        render_pass.draw(0..3, 0..1); // 3 vertices for a covering triangle
    }

    /// Blurs the input texture of the given [`Targets`] into their output
    /// texture, and queues a copy of the result into their readback buffer.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, targets: &Targets) {
        // Pass 1: H blur (input -> ping)
        // Pass 2: V blur (ping -> pong)
        // Passes 3 to 6 repeat between pong and ping, ending in pong.
        let mut source = &targets.input_group;

        for _ in 0..ITERATIONS {
            self.blur_pass(encoder, source, &targets.ping_view, &self.horizontal);
            self.blur_pass(encoder, &targets.ping_group, &targets.pong_view, &self.vertical);

            source = &targets.pong_group;
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &targets.pong,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &targets.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(targets.padded_bytes_per_row),
                    rows_per_image: Some(targets.size.height),
                },
            },
            targets.extent(),
        );
    }
}

/// The textures and buffers a blur runs through, bound to a buffer size.
///
/// They are recreated every time the render target is reallocated.
#[derive(Debug)]
pub struct Targets {
    size: Size<u32>,
    input: wgpu::Texture,
    input_group: wgpu::BindGroup,
    ping_view: wgpu::TextureView,
    ping_group: wgpu::BindGroup,
    pong: wgpu::Texture,
    pong_view: wgpu::TextureView,
    pong_group: wgpu::BindGroup,
    readback: wgpu::Buffer,
    padded_bytes_per_row: u32,
}

impl Targets {
    /// Creates the [`Targets`] for buffers of the given size.
    pub fn new(device: &wgpu::Device, pipeline: &Pipeline, size: Size<u32>) -> Self {
        let texture = |label: &'static str, usage: wgpu::TextureUsages| {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: size.width,
                    height: size.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FORMAT,
                usage: usage | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

            let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("blurring_wgpu.blur.texture_bind_group"),
                layout: &pipeline.texture_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                }],
            });

            (texture, view, group)
        };

        let (input, _, input_group) = texture(
            "blurring_wgpu.blur.input_texture",
            wgpu::TextureUsages::COPY_DST,
        );

        let (_, ping_view, ping_group) = texture(
            "blurring_wgpu.blur.ping_texture",
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        let (pong, pong_view, pong_group) = texture(
            "blurring_wgpu.blur.pong_texture",
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        );

        let padded_bytes_per_row = padded_bytes_per_row(size.width);

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blurring_wgpu.blur.readback_buffer"),
            size: u64::from(padded_bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            size,
            input,
            input_group,
            ping_view,
            ping_group,
            pong,
            pong_view,
            pong_group,
            readback,
            padded_bytes_per_row,
        }
    }

    /// Returns the size the [`Targets`] are bound to.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Returns the texture the captured snapshot is uploaded to.
    pub fn input(&self) -> &wgpu::Texture {
        &self.input
    }

    /// Returns the buffer the blurred result is copied into.
    pub fn readback(&self) -> &wgpu::Buffer {
        &self.readback
    }

    /// Returns the amount of bytes per row of the readback buffer.
    pub fn padded_bytes_per_row(&self) -> u32 {
        self.padded_bytes_per_row
    }

    /// Returns the extent of every texture.
    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.size.width,
            height: self.size.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Rounds the row size of an RGBA texture of the given width up to the
/// alignment required by buffer copies.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width.saturating_mul(4);
    let alignment = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

    unpadded.div_ceil(alignment).saturating_mul(alignment)
}
