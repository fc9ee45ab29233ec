use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, HorizontalAlign, Layout, LayoutSettings, TextStyle};

use crate::coords::Mat3;
use crate::scene::shapes::text::{TextAlign, TextCmd};
use crate::text::FontSystem;

use super::common::{instanced_pipeline, InstanceBuffer, SharedGpu};
use super::RenderCtx;

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    xform: [[f32; 3]; 3],
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x3,
        4 => Float32x2,
        5 => Float32x2,
        6 => Float32x2,
        7 => Float32x2,
        8 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf-packed R8 coverage atlas. Glyphs are rasterized on first use and
/// kept for the renderer's lifetime, keyed by font, glyph and pixel size.
struct GlyphAtlas {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    cursor: (u32, u32),
    row_height: u32,
    full: bool,
    slots: HashMap<GlyphRasterConfig, AtlasSlot>,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("postmark glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("postmark glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("postmark glyph atlas bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        Self {
            texture,
            bind_group,
            cursor: (GLYPH_PADDING, GLYPH_PADDING),
            row_height: 0,
            full: false,
            slots: HashMap::new(),
        }
    }

    fn slot(&mut self, ctx: &RenderCtx<'_>, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasSlot> {
        if let Some(slot) = self.slots.get(&key) {
            return Some(*slot);
        }
        if self.full {
            return None;
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }

        if self.cursor.0 + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor = (GLYPH_PADDING, self.cursor.1 + self.row_height + GLYPH_PADDING);
            self.row_height = 0;
        }
        if self.cursor.1 + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); new glyphs are skipped");
            self.full = true;
            return None;
        }

        let (gx, gy) = self.cursor;
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
        self.cursor.0 += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let size = ATLAS_SIZE as f32;
        let slot = AtlasSlot {
            uv_min: [gx as f32 / size, gy as f32 / size],
            uv_max: [(gx + w) as f32 / size, (gy + h) as f32 / size],
        };
        self.slots.insert(key, slot);
        Some(slot)
    }
}

/// Text runs laid out with fontdue and drawn as textured glyph quads.
pub(super) struct GlyphPipeline {
    pipeline: Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
    atlas_layout: Option<wgpu::BindGroupLayout>,
    atlas: Option<GlyphAtlas>,
    instances: InstanceBuffer<GlyphInstance>,
    layout: Layout<()>,
}

impl GlyphPipeline {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            atlas_layout: None,
            atlas: None,
            instances: InstanceBuffer::new("postmark glyph instances"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn begin(&mut self) {
        self.instances.data.clear();
    }

    /// Lays out and stages one text run; returns its instance range.
    ///
    /// Layout runs at physical pixel density so glyph bitmaps stay crisp, then
    /// positions are scaled back to logical pixels.
    pub fn push(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &Mat3,
        cmd: &TextCmd,
        fonts: &FontSystem,
    ) -> Option<Range<u32>> {
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("unknown font {:?}; text run skipped", cmd.font);
            return None;
        };
        if self.atlas.is_none() {
            let atlas = GlyphAtlas::new(ctx.device, self.ensure_atlas_layout(ctx));
            self.atlas = Some(atlas);
        }
        let Some(atlas) = self.atlas.as_mut() else { return None; };

        let scale = ctx.scale_factor.max(0.25);
        let horizontal_align = match (cmd.align, cmd.max_width) {
            (TextAlign::Center, Some(_)) => HorizontalAlign::Center,
            _ => HorizontalAlign::Left,
        };
        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: cmd.origin.y * scale,
            max_width: cmd.max_width.map(|w| w * scale),
            horizontal_align,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        let color = cmd.color.to_array();
        let start = self.instances.len();
        for g in self.layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let Some(slot) = atlas.slot(ctx, font, g.key) else { continue; };
            self.instances.push(GlyphInstance {
                xform: transform.rows,
                dst_min: [g.x / scale, g.y / scale],
                dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                uv_min: slot.uv_min,
                uv_max: slot.uv_max,
                color,
            });
        }
        let end = self.instances.len();
        (end > start).then_some(start..end)
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, shared: &SharedGpu) {
        if self.instances.len() == 0 {
            return;
        }
        if !matches!(&self.pipeline, Some((format, _)) if *format == ctx.surface_format) {
            let atlas_layout = self.ensure_atlas_layout(ctx);
            let pipeline = instanced_pipeline(
                ctx,
                "postmark glyph pipeline",
                include_str!("shaders/glyph.wgsl"),
                &[&shared.viewport_layout, atlas_layout],
                GlyphInstance::layout(),
            );
            self.pipeline = Some((ctx.surface_format, pipeline));
        }
        self.instances.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedGpu, range: Range<u32>) {
        let Some((_, pipeline)) = &self.pipeline else { return; };
        let Some(atlas) = &self.atlas else { return; };
        let Some(instances) = self.instances.buffer() else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &shared.viewport_bind_group, &[]);
        rpass.set_bind_group(1, &atlas.bind_group, &[]);
        rpass.set_vertex_buffer(0, shared.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(shared.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    fn ensure_atlas_layout(&mut self, ctx: &RenderCtx<'_>) -> &wgpu::BindGroupLayout {
        self.atlas_layout.get_or_insert_with(|| texture_sampler_layout(ctx.device, "postmark glyph atlas bgl"))
    }
}

/// Group 1 layout: a filterable 2D texture and its sampler.
pub(super) fn texture_sampler_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}
