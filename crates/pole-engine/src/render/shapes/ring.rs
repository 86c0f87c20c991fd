use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    instanced_quad_pipeline, surface_bind_group_layout_entry, InstanceBuffer, SurfaceUniform,
    UnitQuad,
};

pub(crate) const RING_SHADER: &str = include_str!("shaders/ring.wgsl");

/// Renderer for `DrawCmd::Ring` (marker circles).
///
/// One instanced draw for all rings in the list; the stroke is an SDF ring
/// with a one-pixel anti-aliased edge.
#[derive(Default)]
pub struct RingRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    surface_ubo: Option<wgpu::Buffer>,

    quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl RingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        let instances = collect_instances(draw_list);
        if !ctx.surface.is_valid() || instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(UnitQuad::new(ctx.device, "pole ring quad"));
        }

        if let Some(ubo) = self.surface_ubo.as_ref() {
            ctx.queue
                .write_buffer(ubo, 0, bytemuck::bytes_of(&SurfaceUniform::new(ctx.surface)));
        }
        self.instances
            .upload(ctx.device, ctx.queue, "pole ring instance vbo", &instances);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(instance_vbo) = self.instances.buffer() else { return };

        let mut rpass = target.begin_overlay_pass("pole ring pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pole ring shader"),
            source: wgpu::ShaderSource::Wgsl(RING_SHADER.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pole ring bgl"),
                entries: &[surface_bind_group_layout_entry()],
            });

        let pipeline = instanced_quad_pipeline(
            ctx.device,
            "pole ring pipeline",
            &shader,
            &bind_group_layout,
            RingInstance::layout(),
            ctx.surface_format,
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.surface_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.surface_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let surface_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pole ring surface ubo"),
            size: std::mem::size_of::<SurfaceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pole ring bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: surface_ubo.as_entire_binding(),
            }],
        });

        self.surface_ubo = Some(surface_ubo);
        self.bind_group = Some(bind_group);
    }
}

fn collect_instances(draw_list: &mut DrawList) -> Vec<RingInstance> {
    draw_list
        .iter_in_paint_order()
        .filter_map(|item| match &item.cmd {
            DrawCmd::Ring(cmd) if cmd.radius > 0.0 && cmd.stroke_width > 0.0 => Some(RingInstance {
                center: [cmd.center.x, cmd.center.y],
                radius_stroke: [cmd.radius, cmd.stroke_width],
                color: cmd.color.to_array(),
            }),
            _ => None,
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  center        [f32; 2]   loc 1
///  offset  8  radius_stroke [f32; 2]   loc 2  (.x = radius, .y = stroke width)
///  offset 16  color         [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RingInstance {
    center: [f32; 2],
    radius_stroke: [f32; 2],
    color: [f32; 4],
}

impl RingInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_stroke
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RingInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    #[test]
    fn instance_layout_is_32_bytes() {
        assert_eq!(std::mem::size_of::<RingInstance>(), 32);
    }

    #[test]
    fn degenerate_rings_are_skipped() {
        let mut list = DrawList::new();
        list.push_ring(ZIndex(0), Vec2::new(1.0, 1.0), 0.0, 3.0, Color::WHITE);
        list.push_ring(ZIndex(0), Vec2::new(2.0, 2.0), 12.0, 0.0, Color::WHITE);
        list.push_ring(ZIndex(0), Vec2::new(3.0, 4.0), 12.0, 3.0, Color::WHITE);

        let instances = collect_instances(&mut list);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].center, [3.0, 4.0]);
        assert_eq!(instances[0].radius_stroke, [12.0, 3.0]);
    }

    #[test]
    fn ring_shader_validates() {
        let module = naga::front::wgsl::parse_str(RING_SHADER)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(RING_SHADER)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{}", e.emit_to_string(RING_SHADER)));
    }
}
