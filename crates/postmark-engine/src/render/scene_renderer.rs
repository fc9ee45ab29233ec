use std::ops::Range;

use crate::images::{ImageId, ImageStore};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::SharedGpu;
use super::glyph::GlyphPipeline;
use super::image::ImagePipeline;
use super::shape::ShapePipeline;
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    Shapes,
    Glyphs,
    Image(ImageId),
}

/// Consecutive instances of one kind, drawn with a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Batch {
    kind: BatchKind,
    range: Range<u32>,
}

/// Extends the last batch when `range` continues it, otherwise starts a new one.
fn append_batch(batches: &mut Vec<Batch>, kind: BatchKind, range: Range<u32>) {
    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.range.end == range.start {
            last.range.end = range.end;
            return;
        }
    }
    batches.push(Batch { kind, range });
}

/// Draws a whole [`DrawList`] in paint order within one render pass.
///
/// Items are staged into per-kind instance buffers; the pass then replays
/// them as batches so interleaved shapes, text and photos keep their order.
pub struct SceneRenderer {
    shared: Option<SharedGpu>,
    shapes: ShapePipeline,
    glyphs: GlyphPipeline,
    images: ImagePipeline,
    batches: Vec<Batch>,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            shared: None,
            shapes: ShapePipeline::new(),
            glyphs: GlyphPipeline::new(),
            images: ImagePipeline::new(),
            batches: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
        images: &ImageStore,
    ) {
        self.shapes.begin();
        self.glyphs.begin();
        self.images.begin();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Shape(cmd) => {
                    if let Some(i) = self.shapes.push(&item.transform, cmd) {
                        append_batch(&mut self.batches, BatchKind::Shapes, i..i + 1);
                    }
                }
                DrawCmd::Text(cmd) => {
                    if let Some(range) = self.glyphs.push(ctx, &item.transform, cmd, fonts) {
                        append_batch(&mut self.batches, BatchKind::Glyphs, range);
                    }
                }
                DrawCmd::Image(cmd) => {
                    if let Some(i) = self.images.push(ctx, &item.transform, cmd, images) {
                        append_batch(&mut self.batches, BatchKind::Image(cmd.image), i..i + 1);
                    }
                }
            }
        }

        let shared = self.shared.get_or_insert_with(|| SharedGpu::new(ctx.device));
        shared.write_viewport(ctx);
        self.shapes.prepare(ctx, shared);
        self.glyphs.prepare(ctx, shared);
        self.images.prepare(ctx, shared);

        let clear = target.clear;
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("postmark scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: clear.r as f64,
                        g: clear.g as f64,
                        b: clear.b as f64,
                        a: clear.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            match batch.kind {
                BatchKind::Shapes => self.shapes.draw(&mut rpass, shared, batch.range.clone()),
                BatchKind::Glyphs => self.glyphs.draw(&mut rpass, shared, batch.range.clone()),
                BatchKind::Image(id) => self.images.draw(&mut rpass, shared, id, batch.range.clone()),
            }
        }
    }
}
