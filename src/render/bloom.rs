use bytemuck::{bytes_of, Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::shaders;
use crate::render::targets::FrameTargets;
use crate::sketch::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BloomUniforms {
    strength: f32,
    radius: f32,
    threshold: f32,
    _padding: f32,
}

impl BloomUniforms {
    fn new() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
            _padding: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BlurUniforms {
    direction: [f32; 2],
    spread: f32,
    _padding: f32,
}

impl BlurUniforms {
    fn new(direction: [f32; 2]) -> Self {
        Self {
            direction,
            spread: 1.0 + BLOOM_RADIUS,
            _padding: 0.0,
        }
    }
}

/// Bloom post-processing chain: bright extraction, separable blur, and the
/// final composite onto the surface.
pub(crate) struct BloomChain {
    bright: BrightPass,
    blur: BlurPass,
    composite: CompositePass,
}

impl BloomChain {
    pub fn new(
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            bright: BrightPass::new(device, targets, sampler),
            blur: BlurPass::new(device, targets, sampler),
            composite: CompositePass::new(device, targets, sampler, surface_format),
        }
    }

    /// Rebinds the chain to freshly created targets after a resize.
    pub fn recreate_bind_groups(
        &mut self,
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) {
        self.bright.recreate_bind_group(device, targets, sampler);
        self.blur.recreate_bind_groups(device, targets, sampler);
        self.composite.recreate_bind_group(device, targets, sampler);
    }

    /// Records the full chain. Ordering is fixed: bright, blur, composite.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &FrameTargets,
        surface_view: &wgpu::TextureView,
    ) {
        self.bright.draw(encoder, targets);
        self.blur.draw(encoder, targets);
        self.composite.draw(encoder, surface_view);
    }
}

fn fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    shader_source: &str,
    target_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn sampled_texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

struct BrightPass {
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl BrightPass {
    fn new(device: &wgpu::Device, targets: &FrameTargets, sampler: &wgpu::Sampler) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom-bright-uniforms"),
            contents: bytes_of(&BloomUniforms::new()),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom-bright-layout"),
            entries: &[
                uniform_entry(0),
                sampled_texture_entry(1),
                sampler_entry(2),
            ],
        });

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            &targets.scene_color_view,
            sampler,
        );

        let pipeline = fullscreen_pipeline(
            device,
            "bloom-bright-pipeline",
            &bind_group_layout,
            shaders::BRIGHT_SHADER,
            FrameTargets::COLOR_FORMAT,
        );

        Self {
            uniform_buffer,
            bind_group_layout,
            bind_group,
            pipeline,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        scene_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom-bright-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn recreate_bind_group(
        &mut self,
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_group = Self::create_bind_group(
            device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &targets.scene_color_view,
            sampler,
        );
    }

    fn draw(&self, encoder: &mut wgpu::CommandEncoder, targets: &FrameTargets) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("bloom-bright-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &targets.bright_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

struct BlurPass {
    horizontal_buffer: wgpu::Buffer,
    vertical_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    horizontal_bind_group: wgpu::BindGroup,
    vertical_bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl BlurPass {
    fn new(device: &wgpu::Device, targets: &FrameTargets, sampler: &wgpu::Sampler) -> Self {
        let horizontal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom-blur-h-uniforms"),
            contents: bytes_of(&BlurUniforms::new([1.0, 0.0])),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let vertical_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom-blur-v-uniforms"),
            contents: bytes_of(&BlurUniforms::new([0.0, 1.0])),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom-blur-layout"),
            entries: &[
                uniform_entry(0),
                sampled_texture_entry(1),
                sampler_entry(2),
            ],
        });

        let (horizontal_bind_group, vertical_bind_group) = Self::create_bind_groups(
            device,
            &bind_group_layout,
            &horizontal_buffer,
            &vertical_buffer,
            targets,
            sampler,
        );

        let pipeline = fullscreen_pipeline(
            device,
            "bloom-blur-pipeline",
            &bind_group_layout,
            shaders::BLUR_SHADER,
            FrameTargets::COLOR_FORMAT,
        );

        Self {
            horizontal_buffer,
            vertical_buffer,
            bind_group_layout,
            horizontal_bind_group,
            vertical_bind_group,
            pipeline,
        }
    }

    fn create_bind_groups(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        horizontal_buffer: &wgpu::Buffer,
        vertical_buffer: &wgpu::Buffer,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let make = |label, buffer: &wgpu::Buffer, view: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            })
        };
        (
            make("bloom-blur-h-bind-group", horizontal_buffer, &targets.bright_view),
            make("bloom-blur-v-bind-group", vertical_buffer, &targets.blur_ping_view),
        )
    }

    fn recreate_bind_groups(
        &mut self,
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) {
        let (horizontal, vertical) = Self::create_bind_groups(
            device,
            &self.bind_group_layout,
            &self.horizontal_buffer,
            &self.vertical_buffer,
            targets,
            sampler,
        );
        self.horizontal_bind_group = horizontal;
        self.vertical_bind_group = vertical;
    }

    fn draw(&self, encoder: &mut wgpu::CommandEncoder, targets: &FrameTargets) {
        let steps = [
            (&self.horizontal_bind_group, &targets.blur_ping_view),
            (&self.vertical_bind_group, &targets.blur_pong_view),
        ];
        for (bind_group, view) in steps {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bloom-blur-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
    }
}

struct CompositePass {
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl CompositePass {
    fn new(
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom-composite-uniforms"),
            contents: bytes_of(&BloomUniforms::new()),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom-composite-layout"),
            entries: &[
                uniform_entry(0),
                sampled_texture_entry(1),
                sampled_texture_entry(2),
                sampler_entry(3),
            ],
        });

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            targets,
            sampler,
        );

        let pipeline = fullscreen_pipeline(
            device,
            "bloom-composite-pipeline",
            &bind_group_layout,
            shaders::COMPOSITE_SHADER,
            surface_format,
        );

        Self {
            uniform_buffer,
            bind_group_layout,
            bind_group,
            pipeline,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bloom-composite-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.scene_color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&targets.blur_pong_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn recreate_bind_group(
        &mut self,
        device: &wgpu::Device,
        targets: &FrameTargets,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_group = Self::create_bind_group(
            device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            targets,
            sampler,
        );
    }

    fn draw(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("bloom-composite-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
