use serde::Serialize;

use crate::presets::{ColorMatrix, FilterPreset};

/// Intensity-resolved values for one render call. Built immediately before
/// a render, consumed by the pipeline, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveParameters {
    pub saturation: f32,
    pub contrast: f32,
    pub brightness: f32,
    pub warmth: f32,
    pub tint: f32,
    pub vignette: f32,
    pub grain: f32,
    pub grayscale: bool,
    pub channel_mix: ColorMatrix,
}

fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

impl FilterPreset {
    /// Blends this preset toward the neutral transform. Intensity is
    /// clamped to [0,1]; each scalar lerps from its neutral value
    /// (saturation and contrast 1.0, the rest 0.0).
    ///
    /// Two fields do not blend: `grayscale` is a hard switch that engages
    /// strictly past the 0.5 midpoint, and `channel_mix` always applies at
    /// full strength. Intensity 0 is therefore only a pixel-identical
    /// bypass for presets whose matrix is the identity.
    pub fn at_intensity(&self, intensity: f32) -> EffectiveParameters {
        let t = intensity.clamp(0.0, 1.0);
        EffectiveParameters {
            saturation: lerp(1.0, self.saturation, t),
            contrast: lerp(1.0, self.contrast, t),
            brightness: lerp(0.0, self.brightness, t),
            warmth: lerp(0.0, self.warmth, t),
            tint: lerp(0.0, self.tint, t),
            vignette: lerp(0.0, self.vignette, t),
            grain: lerp(0.0, self.grain, t),
            grayscale: self.grayscale && t > 0.5,
            channel_mix: self.channel_mix,
        }
    }
}

impl EffectiveParameters {
    /// The no-op parameter set: neutral scalars, identity matrix.
    pub fn neutral() -> Self {
        EffectiveParameters {
            saturation: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            warmth: 0.0,
            tint: 0.0,
            vignette: 0.0,
            grain: 0.0,
            grayscale: false,
            channel_mix: ColorMatrix::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{find_preset, presets};

    #[test]
    fn test_zero_intensity_is_neutral() {
        for preset in presets() {
            let params = preset.at_intensity(0.0);
            assert_eq!(params.saturation, 1.0, "{}", preset.id);
            assert_eq!(params.contrast, 1.0, "{}", preset.id);
            assert_eq!(params.brightness, 0.0, "{}", preset.id);
            assert_eq!(params.warmth, 0.0, "{}", preset.id);
            assert_eq!(params.tint, 0.0, "{}", preset.id);
            assert_eq!(params.vignette, 0.0, "{}", preset.id);
            assert_eq!(params.grain, 0.0, "{}", preset.id);
            assert!(!params.grayscale, "{}", preset.id);
            // the matrix is the one field that never fades
            assert_eq!(params.channel_mix, preset.channel_mix, "{}", preset.id);
        }
    }

    #[test]
    fn test_full_intensity_matches_preset() {
        for preset in presets() {
            let params = preset.at_intensity(1.0);
            assert_eq!(params.saturation, preset.saturation, "{}", preset.id);
            assert_eq!(params.contrast, preset.contrast, "{}", preset.id);
            assert_eq!(params.brightness, preset.brightness, "{}", preset.id);
            assert_eq!(params.warmth, preset.warmth, "{}", preset.id);
            assert_eq!(params.tint, preset.tint, "{}", preset.id);
            assert_eq!(params.vignette, preset.vignette, "{}", preset.id);
            assert_eq!(params.grain, preset.grain, "{}", preset.id);
            assert_eq!(params.grayscale, preset.grayscale, "{}", preset.id);
        }
    }

    #[test]
    fn test_interpolation_is_linear() {
        let preset = find_preset("classic_neg");
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let params = preset.at_intensity(t);
            assert!((params.saturation - lerp(1.0, preset.saturation, t)).abs() < 1e-6);
            assert!((params.contrast - lerp(1.0, preset.contrast, t)).abs() < 1e-6);
            assert!((params.brightness - lerp(0.0, preset.brightness, t)).abs() < 1e-6);
            assert!((params.warmth - lerp(0.0, preset.warmth, t)).abs() < 1e-6);
            assert!((params.tint - lerp(0.0, preset.tint, t)).abs() < 1e-6);
            assert!((params.vignette - lerp(0.0, preset.vignette, t)).abs() < 1e-6);
            assert!((params.grain - lerp(0.0, preset.grain, t)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_grayscale_gate_is_strict_midpoint() {
        let mono = find_preset("acros");
        assert!(mono.grayscale);
        assert!(!mono.at_intensity(0.0).grayscale);
        assert!(!mono.at_intensity(0.5).grayscale);
        assert!(mono.at_intensity(0.500001).grayscale);
        assert!(mono.at_intensity(1.0).grayscale);

        let color = find_preset("velvia");
        assert!(!color.at_intensity(1.0).grayscale);
    }

    #[test]
    fn test_intensity_clamped() {
        let preset = find_preset("velvia");
        assert_eq!(preset.at_intensity(-1.0), preset.at_intensity(0.0));
        assert_eq!(preset.at_intensity(2.0), preset.at_intensity(1.0));
        // NaN never engages the mono switch
        assert!(!preset.at_intensity(f32::NAN).grayscale);
    }

    #[test]
    fn test_matrix_verbatim_at_every_intensity() {
        let preset = find_preset("acros_r");
        for step in 0..=4 {
            let t = step as f32 / 4.0;
            assert_eq!(preset.at_intensity(t).channel_mix, preset.channel_mix);
        }
    }

    #[test]
    fn test_neutral_parameters() {
        let neutral = EffectiveParameters::neutral();
        assert_eq!(neutral.saturation, 1.0);
        assert_eq!(neutral.contrast, 1.0);
        assert_eq!(neutral.grain, 0.0);
        assert!(neutral.channel_mix.is_identity());
    }
}
