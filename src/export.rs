use image::{DynamicImage, GenericImageView};

use crate::errors::{FilmError, Result};
use crate::presets::FilterPreset;
use crate::renderer::Renderer;

/// Default JPEG quality for exports.
pub const DEFAULT_EXPORT_QUALITY: u8 = 95;

/// Renders `image` through `preset` at full native resolution and encodes
/// the result as JPEG bytes.
///
/// The on-screen renderer typically works on a downscaled copy; this path
/// spins up a dedicated renderer sized to the source so the export never
/// inherits preview scaling.
pub fn export_jpeg(
    image: &DynamicImage,
    preset: &FilterPreset,
    intensity: f32,
    quality: u8,
) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(FilmError::EncodingFailed {
            message: format!("{}x{} exceeds the JPEG dimension limit", width, height),
        });
    }

    let mut renderer = Renderer::new(width, height);
    if !renderer.is_ready() {
        return Err(FilmError::GpuUnavailable {
            message: "renderer could not be initialized for export".into(),
        });
    }

    renderer.set_image(image);
    if !renderer.has_image() {
        return Err(FilmError::GpuUnavailable {
            message: "source image could not be bound for export".into(),
        });
    }

    renderer.render(preset, intensity);
    let pixels = renderer.read_pixels()?;

    log::debug!(
        "exporting {}x{} as JPEG with preset '{}' at quality {}",
        width,
        height,
        preset.id,
        quality
    );

    let rgb = DynamicImage::ImageRgba8(pixels).to_rgb8();
    let mut jpeg = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg, quality);
    encoder
        .encode(&rgb, width as u16, height as u16, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| FilmError::EncodingFailed {
            message: e.to_string(),
        })?;

    Ok(jpeg)
}
