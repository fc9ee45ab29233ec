use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::Mat3;
use crate::images::{ImageData, ImageId, ImageStore};
use crate::scene::shapes::image::ImageCmd;

use super::common::{instanced_pipeline, InstanceBuffer, SharedGpu};
use super::glyph::texture_sampler_layout;
use super::RenderCtx;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ImageInstance {
    xform: [[f32; 3]; 3],
    origin: [f32; 2],
    size: [f32; 2],
    /// corner radius, opacity, unused, unused
    params: [f32; 4],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x3,
        4 => Float32x2,
        5 => Float32x2,
        6 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Photos drawn as rounded, optionally faded textured quads.
///
/// Each [`ImageId`] is uploaded once, on the first frame it is drawn.
pub(super) struct ImagePipeline {
    pipeline: Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
    textures: HashMap<ImageId, wgpu::BindGroup>,
    instances: InstanceBuffer<ImageInstance>,
}

impl ImagePipeline {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            texture_layout: None,
            sampler: None,
            textures: HashMap::new(),
            instances: InstanceBuffer::new("postmark image instances"),
        }
    }

    pub fn begin(&mut self) {
        self.instances.data.clear();
    }

    pub fn push(
        &mut self,
        ctx: &RenderCtx<'_>,
        transform: &Mat3,
        cmd: &ImageCmd,
        images: &ImageStore,
    ) -> Option<u32> {
        let r = cmd.rect.normalized();
        if r.is_empty() || cmd.opacity <= 0.0 {
            return None;
        }
        if !self.textures.contains_key(&cmd.image) {
            let Some(data) = images.get(cmd.image) else {
                log::warn!("unknown image {:?}; draw skipped", cmd.image);
                return None;
            };
            let bind_group = self.upload(ctx, data);
            self.textures.insert(cmd.image, bind_group);
        }
        Some(self.instances.push(ImageInstance {
            xform: transform.rows,
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            params: [cmd.corner_radius.max(0.0), cmd.opacity.clamp(0.0, 1.0), 0.0, 0.0],
        }))
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, shared: &SharedGpu) {
        if self.instances.len() == 0 {
            return;
        }
        if !matches!(&self.pipeline, Some((format, _)) if *format == ctx.surface_format) {
            let texture_layout = self.ensure_texture_layout(ctx);
            let pipeline = instanced_pipeline(
                ctx,
                "postmark image pipeline",
                include_str!("shaders/image.wgsl"),
                &[&shared.viewport_layout, texture_layout],
                ImageInstance::layout(),
            );
            self.pipeline = Some((ctx.surface_format, pipeline));
        }
        self.instances.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, shared: &SharedGpu, image: ImageId, range: Range<u32>) {
        let Some((_, pipeline)) = &self.pipeline else { return; };
        let Some(texture) = self.textures.get(&image) else { return; };
        let Some(instances) = self.instances.buffer() else { return; };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &shared.viewport_bind_group, &[]);
        rpass.set_bind_group(1, texture, &[]);
        rpass.set_vertex_buffer(0, shared.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(shared.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    fn ensure_texture_layout(&mut self, ctx: &RenderCtx<'_>) -> &wgpu::BindGroupLayout {
        self.texture_layout
            .get_or_insert_with(|| texture_sampler_layout(ctx.device, "postmark image bgl"))
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, data: &ImageData) -> wgpu::BindGroup {
        let size = wgpu::Extent3d { width: data.width, height: data.height, depth_or_array_layers: 1 };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("postmark photo"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );
        log::debug!("uploaded photo texture {}x{}", data.width, data.height);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self
            .sampler
            .get_or_insert_with(|| {
                ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                    label: Some("postmark photo sampler"),
                    address_mode_u: wgpu::AddressMode::ClampToEdge,
                    address_mode_v: wgpu::AddressMode::ClampToEdge,
                    address_mode_w: wgpu::AddressMode::ClampToEdge,
                    mag_filter: wgpu::FilterMode::Linear,
                    min_filter: wgpu::FilterMode::Linear,
                    mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                    ..Default::default()
                })
            })
            .clone();
        let layout = self.ensure_texture_layout(ctx);

        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("postmark photo bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        })
    }
}
