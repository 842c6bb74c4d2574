use image::RgbaImage;

use super::types::{FilterParams, Renderer};
use crate::errors::{FilmError, Result};
use crate::presets::FilterPreset;

impl Renderer {
    /// Renders the bound image through the film pipeline onto the target
    /// surface: one uniform upload, one full-surface draw. No-op unless a
    /// source image is bound.
    ///
    /// Every call draws a fresh grain seed, so renders with grain > 0 are
    /// intentionally not pixel-identical across calls.
    pub fn render(&self, preset: &FilterPreset, intensity: f32) {
        let Some(ctx) = self.state.as_ref() else {
            log::debug!("render ignored: renderer is not initialized");
            return;
        };
        let Some(source) = ctx.source.as_ref() else {
            log::debug!("render ignored: no image bound");
            return;
        };

        let params = preset.at_intensity(intensity);
        let uniforms = FilterParams::new(&params, rand::random::<f32>());
        ctx.queue
            .write_buffer(&ctx.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("film_render_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("film_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &ctx.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&ctx.pipeline);
            pass.set_bind_group(0, &source.bind_group, &[]);
            pass.set_vertex_buffer(0, ctx.vertex_buffer.slice(..));
            pass.draw(0..6, 0..1);
        }
        ctx.queue.submit(Some(encoder.finish()));
    }

    /// Copies the target surface back to the CPU. Blocks until the copy
    /// retires. Rows come back through a staging buffer padded to the
    /// copy alignment; the padding is stripped before returning.
    pub fn read_pixels(&self) -> Result<RgbaImage> {
        let ctx = self.state.as_ref().ok_or_else(|| FilmError::GpuUnavailable {
            message: "renderer was never initialized".into(),
        })?;

        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let bytes_per_row = (4 * self.width).div_ceil(align) * align;

        let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("film_readback_buffer"),
            size: bytes_per_row as u64 * self.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("film_readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &ctx.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        ctx.queue.submit(Some(encoder.finish()));

        let buffer_slice = staging.slice(..);
        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        ctx.device.poll(wgpu::Maintain::Wait);

        match pollster::block_on(rx.receive()) {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                return Err(FilmError::ReadbackFailed {
                    message: err.to_string(),
                })
            }
            None => {
                return Err(FilmError::ReadbackFailed {
                    message: "map callback dropped without a result".into(),
                })
            }
        }

        // Strip row padding, then drop the view before unmapping
        let pixels = {
            let data = buffer_slice.get_mapped_range();
            let row_bytes = (4 * self.width) as usize;
            let mut pixels = Vec::with_capacity(row_bytes * self.height as usize);
            for row in 0..self.height {
                let start = row as usize * bytes_per_row as usize;
                pixels.extend_from_slice(&data[start..start + row_bytes]);
            }
            pixels
        };
        staging.unmap();

        RgbaImage::from_raw(self.width, self.height, pixels).ok_or_else(|| {
            FilmError::ReadbackFailed {
                message: "staging buffer did not match surface dimensions".into(),
            }
        })
    }
}
