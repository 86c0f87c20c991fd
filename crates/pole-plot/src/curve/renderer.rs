use std::borrow::Cow;

use pole_engine::render::{RenderCtx, RenderTarget};

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::mapper::CoordinateMapper;
use crate::plot::PlotState;

use super::shader::{validate_wgsl, CURVE_SHADER, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::uniform::CurveUniform;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// `[1,1, -1,1, 1,-1, -1,-1]` as a triangle strip.
const QUAD_POSITIONS: [[f32; 2]; 4] = [[1.0, 1.0], [-1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];

/// Lifecycle of the curve pipeline.
///
/// `Disabled` is terminal: a shader that failed once is never retried.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveState {
    Pending,
    Ready,
    Disabled,
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Draws the implicit curves with one full-viewport quad per frame.
pub struct CurveRenderer {
    state: CurveState,
    source: Cow<'static, str>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    ubo: Option<wgpu::Buffer>,
    quad_vbo: Option<wgpu::Buffer>,
    depth: Option<DepthTarget>,
}

impl Default for CurveRenderer {
    fn default() -> Self {
        Self::with_source(CURVE_SHADER)
    }
}

impl CurveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer for a custom shader. It must expose the same entry points and
    /// uniform block as the built-in one.
    pub fn with_source(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            state: CurveState::Pending,
            source: source.into(),
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            ubo: None,
            quad_vbo: None,
            depth: None,
        }
    }

    #[inline]
    pub fn state(&self) -> CurveState {
        self.state
    }

    /// Checks the shader source once. On failure the diagnostic is logged and
    /// the renderer is disabled for the rest of the session.
    pub fn validate(&mut self) -> Result<()> {
        match self.state {
            CurveState::Ready => Ok(()),
            CurveState::Disabled => Err(PlotError::Initialization(
                "curve renderer is disabled".to_string(),
            )),
            CurveState::Pending => validate_wgsl(&self.source).inspect_err(|e| {
                log::error!("curve renderer disabled: {e}");
                self.state = CurveState::Disabled;
            }),
        }
    }

    /// Draws the curve for `plot` into `target`. A disabled renderer is a
    /// no-op.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mapper: &CoordinateMapper,
        plot: &PlotState,
        config: &PlotConfig,
    ) {
        if self.state == CurveState::Disabled || self.validate().is_err() {
            return;
        }

        let (w, h) = mapper.size();
        let (width, height) = (w as u32, h as u32);
        // The depth attachment must match the color target.
        if width != ctx.surface.width as u32 || height != ctx.surface.height as u32 {
            log::debug!(
                "curve: geometry {width}x{height} differs from surface {}x{}, skipping",
                ctx.surface.width,
                ctx.surface.height
            );
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_depth(ctx.device, width, height);

        if let Some(ubo) = self.ubo.as_ref() {
            let uniform = CurveUniform::new(mapper, &plot.points, config);
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(depth) = self.depth.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pole curve pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.draw(0..QUAD_POSITIONS.len() as u32, 0..1);
    }

    /// Drops every GPU object. The next render recreates them (unless the
    /// renderer is disabled).
    pub fn release(&mut self) {
        self.pipeline_format = None;
        self.pipeline = None;
        self.bind_group = None;
        self.ubo = None;
        self.quad_vbo = None;
        self.depth = None;
        if self.state == CurveState::Ready {
            self.state = CurveState::Pending;
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        use wgpu::util::DeviceExt;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pole curve shader"),
            source: wgpu::ShaderSource::Wgsl(self.source.clone()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pole curve bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<CurveUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pole curve pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let vertex_attrs = wgpu::vertex_attr_array![0 => Float32x2];
        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pole curve pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &vertex_attrs,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pole curve ubo"),
            size: std::mem::size_of::<CurveUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pole curve bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        if self.quad_vbo.is_none() {
            self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("pole curve quad vbo"),
                contents: bytemuck::cast_slice(&QUAD_POSITIONS),
                usage: wgpu::BufferUsages::VERTEX,
            }));
        }

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        if self.state == CurveState::Pending {
            log::debug!("curve renderer ready ({:?})", ctx.surface_format);
            self.state = CurveState::Ready;
        }
    }

    fn ensure_depth(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth.as_ref().is_some_and(|d| d.width == width && d.height == height) {
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pole curve depth"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth = Some(DepthTarget { _texture: texture, view, width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shader_passes_validation() {
        let mut r = CurveRenderer::new();
        assert!(r.validate().is_ok());
        assert_eq!(r.state(), CurveState::Pending);
    }

    #[test]
    fn broken_shader_disables_for_good() {
        let mut r = CurveRenderer::with_source("@vertex fn vs_main( -> {");
        let err = r.validate().unwrap_err();
        assert!(matches!(err, PlotError::Initialization(_)));
        assert_eq!(r.state(), CurveState::Disabled);

        // No retry: later calls fail without re-running validation.
        assert!(r.validate().is_err());
        assert_eq!(r.state(), CurveState::Disabled);
    }

    #[test]
    fn shader_without_pipeline_entry_points_disables() {
        let mut r = CurveRenderer::with_source(
            "@fragment fn other() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        );
        assert!(r.validate().is_err());
        assert_eq!(r.state(), CurveState::Disabled);
    }

    #[test]
    fn release_keeps_disabled_state() {
        let mut r = CurveRenderer::with_source("nonsense");
        let _ = r.validate();
        r.release();
        assert_eq!(r.state(), CurveState::Disabled);
    }

    #[test]
    fn quad_is_a_four_vertex_strip() {
        assert_eq!(QUAD_POSITIONS.len(), 4);
        assert_eq!(QUAD_POSITIONS[0], [1.0, 1.0]);
        assert_eq!(QUAD_POSITIONS[3], [-1.0, -1.0]);
    }
}
