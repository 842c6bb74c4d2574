use image::DynamicImage;

use super::types::{Renderer, SourceTexture};

impl Renderer {
    /// Uploads the image as the renderer's source texture, replacing any
    /// previously bound one (the old texture drops here, so repeated calls
    /// with new images do not leak GPU memory). Silent no-op on an inert
    /// renderer.
    pub fn set_image(&mut self, image: &DynamicImage) {
        let Some(ctx) = self.state.as_mut() else {
            log::debug!("set_image ignored: renderer is not initialized");
            return;
        };

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            log::warn!("set_image ignored: empty image");
            return;
        }
        let max_dim = ctx.device.limits().max_texture_dimension_2d;
        if width > max_dim || height > max_dim {
            log::warn!(
                "set_image ignored: {}x{} exceeds the device texture limit of {}",
                width,
                height,
                max_dim
            );
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("film_source_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("film_source_bind_group"),
            layout: &ctx.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&ctx.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: ctx.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        tracing::debug!(width, height, "source texture bound");
        ctx.source = Some(SourceTexture {
            texture,
            bind_group,
        });
    }
}
