use image::DynamicImage;
use rayon::prelude::*;

use crate::params::EffectiveParameters;

/// Perceptual luminance weights shared by the saturation and grayscale
/// stages (the GPU program hardcodes the same three values).
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Minimum brightness kept at the frame corners by the vignette stage.
pub const VIGNETTE_FLOOR: f32 = 0.2;

// fract() with shader semantics: always in [0, 1), also for negatives
fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

// Canonical one-liner hash noise, same constants as the shader
fn grain_noise(u: f32, v: f32, seed: f32) -> f32 {
    fract(((u + seed) * 12.9898 + (v + seed) * 78.233).sin() * 43758.5453)
}

/// Applies the film pipeline on the CPU: the same eight stages, in the
/// same order, as the GPU program. `seed` fixes the grain pattern, which
/// makes this path reproducible where the GPU renderer intentionally is
/// not (it draws a fresh seed every call).
///
/// Arithmetic runs in normalized [0,1] floats per channel; the result is
/// clamped only at the final quantization back to 8 bits, matching the
/// fixed-point clamp of a GPU surface. Alpha passes through untouched.
pub fn apply_film(
    image: &DynamicImage,
    params: &EffectiveParameters,
    seed: f32,
) -> DynamicImage {
    let mut img = image.to_rgba8();
    let (width, height) = img.dimensions();

    let width_f = width as f32;
    let height_f = height as f32;

    let mut samples = img.as_flat_samples_mut();
    let raw_pixels = samples.as_mut_slice();

    // Chunk on pixel boundaries so no thread ever sees half a pixel
    let pixel_count = (width * height) as usize;
    let pixels_per_thread = (pixel_count / num_cpus::get()).max(1);
    let bytes_per_chunk = pixels_per_thread * 4;

    raw_pixels
        .par_chunks_mut(bytes_per_chunk)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let chunk_start_pixel = chunk_idx * pixels_per_thread;

            for (local_idx, pixel) in chunk.chunks_mut(4).enumerate() {
                if pixel.len() < 4 {
                    continue;
                }

                let pixel_idx = chunk_start_pixel + local_idx;
                let px = (pixel_idx % width as usize) as f32;
                let py = (pixel_idx / width as usize) as f32;

                // Normalized coordinate of the pixel center, the same
                // value the fragment shader sees for this texel
                let u = (px + 0.5) / width_f;
                let v = (py + 0.5) / height_f;

                let r0 = pixel[0] as f32 / 255.0;
                let g0 = pixel[1] as f32 / 255.0;
                let b0 = pixel[2] as f32 / 255.0;

                // 1. Channel mix (film stock spectral response)
                let [mut r, mut g, mut b] = params.channel_mix.apply([r0, g0, b0]);

                // 2. Brightness
                r += params.brightness;
                g += params.brightness;
                b += params.brightness;

                // 3. Contrast around mid-gray
                r = (r - 0.5) * params.contrast + 0.5;
                g = (g - 0.5) * params.contrast + 0.5;
                b = (b - 0.5) * params.contrast + 0.5;

                // 4. Saturation against perceptual luminance
                let luma = r * LUMA_WEIGHTS[0] + g * LUMA_WEIGHTS[1] + b * LUMA_WEIGHTS[2];
                r = mix(luma, r, params.saturation);
                g = mix(luma, g, params.saturation);
                b = mix(luma, b, params.saturation);

                // 5. White balance: warmth toward orange, tint magenta/green
                r += params.warmth * 0.1 + params.tint * 0.1;
                g += params.warmth * 0.05 - params.tint * 0.1;
                b -= params.warmth * 0.1;

                // 6. Mono override, recomputed on the adjusted color
                if params.grayscale {
                    let gray = r * LUMA_WEIGHTS[0] + g * LUMA_WEIGHTS[1] + b * LUMA_WEIGHTS[2];
                    r = gray;
                    g = gray;
                    b = gray;
                }

                // 7. Vignette: radial falloff from the frame center,
                // corners never drop below the floor
                let du = u - 0.5;
                let dv = v - 0.5;
                let dist = (du * du + dv * dv).sqrt();
                let falloff =
                    (1.0 - dist * params.vignette * 1.5).clamp(VIGNETTE_FLOOR, 1.0);
                r *= falloff;
                g *= falloff;
                b *= falloff;

                // 8. Grain: half-strength overlay of hash noise
                if params.grain > 0.0 {
                    let noise = grain_noise(u, v, seed);
                    let offset = (noise - 0.5) * params.grain;
                    r = mix(r, r + offset, 0.5);
                    g = mix(g, g + offset, 0.5);
                    b = mix(b, b + offset, 0.5);
                }

                pixel[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
                pixel[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
                pixel[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
                // pixel[3] untouched
            }
        });

    DynamicImage::ImageRgba8(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fract_shader_semantics() {
        assert!((fract(1.25) - 0.25).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!(fract(-3.0).abs() < 1e-6);
    }

    #[test]
    fn test_grain_noise_unit_range() {
        for i in 0..100 {
            let u = i as f32 / 100.0;
            let n = grain_noise(u, 1.0 - u, 0.42);
            assert!((0.0..1.0).contains(&n), "noise {} out of range", n);
        }
    }

    #[test]
    fn test_grain_noise_seed_sensitivity() {
        let a = grain_noise(0.3, 0.7, 0.1);
        let b = grain_noise(0.3, 0.7, 0.1);
        let c = grain_noise(0.3, 0.7, 0.9);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
