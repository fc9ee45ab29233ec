use bytemuck::{Pod, Zeroable};

use crate::coords::Mat3;
use crate::scene::shapes::shape::ShapeCmd;

use super::common::{instanced_pipeline, InstanceBuffer, SharedGpu};
use super::RenderCtx;

/// Extra logical pixels around each quad so the SDF edge can fade out.
const AA_MARGIN: f32 = 1.5;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ShapeInstance {
    xform: [[f32; 3]; 3],
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
    /// kind, corner radius, aa margin, unused
    params: [f32; 4],
}

impl ShapeInstance {
    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x3,
        4 => Float32x2,
        5 => Float32x2,
        6 => Float32x4,
        7 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// SDF-filled rounded rects, ellipses and triangles.
pub(super) struct ShapePipeline {
    pipeline: Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
    instances: InstanceBuffer<ShapeInstance>,
}

impl ShapePipeline {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            instances: InstanceBuffer::new("postmark shape instances"),
        }
    }

    pub fn begin(&mut self) {
        self.instances.data.clear();
    }

    /// Stages one shape; returns its instance index, or `None` when it draws nothing.
    pub fn push(&mut self, transform: &Mat3, cmd: &ShapeCmd) -> Option<u32> {
        let r = cmd.rect.normalized();
        if r.is_empty() || cmd.color.a <= 0.0 {
            return None;
        }
        Some(self.instances.push(ShapeInstance {
            xform: transform.rows,
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            color: cmd.color.to_array(),
            params: [cmd.kind.code(), cmd.kind.radius(), AA_MARGIN, 0.0],
        }))
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, shared: &SharedGpu) {
        if self.instances.len() == 0 {
            return;
        }
        if !matches!(&self.pipeline, Some((format, _)) if *format == ctx.surface_format) {
            let pipeline = instanced_pipeline(
                ctx,
                "postmark shape pipeline",
                include_str!("shaders/shape.wgsl"),
                &[&shared.viewport_layout],
                ShapeInstance::layout(),
            );
            self.pipeline = Some((ctx.surface_format, pipeline));
        }
        self.instances.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedGpu, range: std::ops::Range<u32>) {
        let Some((_, pipeline)) = &self.pipeline else { return; };
        let Some(instances) = self.instances.buffer() else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &shared.viewport_bind_group, &[]);
        rpass.set_vertex_buffer(0, shared.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(shared.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }
}
