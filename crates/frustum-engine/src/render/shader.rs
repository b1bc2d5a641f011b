use std::borrow::Cow;
use std::num::NonZeroU64;
use std::ops::Range;

use glam::Mat4;

use super::backend::{DrawBackend, DrawCall, Primitive};
use super::ctx::{RenderCtx, RenderTarget};
use super::mesh::MeshBuffer;
use super::uniforms::{UniformBlock, UniformLayout, UniformLocation};
use crate::core::StartupError;
use crate::device::Scoped;
use crate::model::Vertex;

/// WGSL program text plus its entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub label: Cow<'static, str>,
    pub wgsl: Cow<'static, str>,
    pub vertex_entry: Cow<'static, str>,
    pub fragment_entry: Cow<'static, str>,
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("triangle"),
            wgsl: Cow::Borrowed(include_str!("shaders/triangle.wgsl")),
            vertex_entry: Cow::Borrowed("vs_main"),
            fragment_entry: Cow::Borrowed("fs_main"),
        }
    }
}

impl ShaderSource {
    /// Custom WGSL using the default `vs_main`/`fs_main` entry points.
    pub fn wgsl(label: impl Into<Cow<'static, str>>, wgsl: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            wgsl: wgsl.into(),
            ..Self::default()
        }
    }

    pub fn with_entries(
        mut self,
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.vertex_entry = vertex.into();
        self.fragment_entry = fragment.into();
        self
    }

    /// Parses, validates and reflects the program.
    ///
    /// Every failure is a [`StartupError::Shader`] whose log is the rendered
    /// naga diagnostic (with source excerpt where one is available).
    pub fn compile(&self) -> Result<CompiledShader, StartupError> {
        let module = naga::front::wgsl::parse_str(&self.wgsl).map_err(|e| StartupError::Shader {
            log: e.emit_to_string(&self.wgsl),
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| StartupError::Shader {
            log: e.emit_to_string(&self.wgsl),
        })?;

        require_entry(&module, &self.vertex_entry, naga::ShaderStage::Vertex)?;
        require_entry(&module, &self.fragment_entry, naga::ShaderStage::Fragment)?;

        let layout = UniformLayout::reflect(&module).map_err(|log| StartupError::Shader { log })?;
        log::debug!(
            "shader `{}` compiled; uniform block {} bytes [{}]",
            self.label,
            layout.size(),
            layout.names().collect::<Vec<_>>().join(", ")
        );

        Ok(CompiledShader {
            source: self.clone(),
            layout,
        })
    }
}

fn require_entry(
    module: &naga::Module,
    name: &str,
    stage: naga::ShaderStage,
) -> Result<(), StartupError> {
    match module.entry_points.iter().find(|ep| ep.name == name) {
        Some(ep) if ep.stage == stage => Ok(()),
        Some(ep) => Err(StartupError::Shader {
            log: format!("entry point `{name}` is a {:?} shader, expected {stage:?}", ep.stage),
        }),
        None => Err(StartupError::Shader {
            log: format!("missing {stage:?} entry point `{name}`"),
        }),
    }
}

/// A validated program with its reflected uniform layout.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    source: ShaderSource,
    layout: UniformLayout,
}

impl CompiledShader {
    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }
}

/// Linked render pipeline, its uniform buffer and bind group.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniforms: Scoped<wgpu::Buffer>,
    layout: UniformLayout,
    staging: UniformBlock,
}

impl ShaderProgram {
    /// Builds the pipeline for `ctx.surface_format`.
    pub fn link(ctx: &RenderCtx<'_>, compiled: &CompiledShader) -> Self {
        let src = &compiled.source;
        let layout = compiled.layout.clone();

        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&*src.label),
            source: wgpu::ShaderSource::Wgsl(src.wgsl.clone()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frustum uniforms bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(layout.size() as u64),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("frustum pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&*src.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(&*src.vertex_entry),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(&*src.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: Primitive::Triangles.topology(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Uniform bindings must be at least 16 bytes even when the shader has no block.
        let uniforms = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frustum uniform buffer"),
            size: u64::from(layout.size().max(16)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frustum uniforms bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        log::info!("shader program `{}` linked for {:?}", src.label, ctx.surface_format);

        Self {
            pipeline,
            bind_group,
            uniforms: Scoped::new("uniform buffer", uniforms),
            staging: UniformBlock::new(layout.size()),
            layout,
        }
    }

    /// Looks up a matrix uniform by name.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.layout.location(name)
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Starts collecting one frame's uniforms and draws.
    pub fn begin_pass(&mut self) -> TrianglePass<'_> {
        TrianglePass {
            program: self,
            draws: Vec::new(),
        }
    }
}

/// One frame's worth of work against a [`ShaderProgram`].
///
/// Uniform writes go to the program's staging block; [`TrianglePass::encode`]
/// uploads the block and records the render pass.
pub struct TrianglePass<'p> {
    program: &'p mut ShaderProgram,
    draws: Vec<DrawCall>,
}

impl DrawBackend for TrianglePass<'_> {
    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        self.program.uniform_location(name)
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.program.staging.write_mat4(location, value);
    }

    fn draw(&mut self, primitive: Primitive, vertices: Range<u32>) {
        self.draws.push(DrawCall { primitive, vertices });
    }
}

impl TrianglePass<'_> {
    /// Uploads staged uniforms, clears the target and replays the draws.
    pub fn encode(
        self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &MeshBuffer,
        clear: wgpu::Color,
    ) {
        let program = self.program;

        if !program.staging.as_bytes().is_empty() {
            ctx.queue.write_buffer(&program.uniforms, 0, program.staging.as_bytes());
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("frustum triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&program.pipeline);
        rpass.set_bind_group(0, &program.bind_group, &[]);
        rpass.set_vertex_buffer(0, mesh.slice());

        for call in self.draws {
            let end = call.vertices.end.min(mesh.count());
            if call.vertices.start < end {
                rpass.draw(call.vertices.start..end, 0..1);
            }
        }
    }
}
