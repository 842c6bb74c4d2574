use serde::Serialize;

/// 3x3 linear transform of an RGB triple. Rows are output channels:
/// `out = M * in`, so `r` holds the input weights for the output red
/// channel. Rows are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorMatrix {
    pub r: [f32; 3],
    pub g: [f32; 3],
    pub b: [f32; 3],
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        r: [1.0, 0.0, 0.0],
        g: [0.0, 1.0, 0.0],
        b: [0.0, 0.0, 1.0],
    };

    /// Applies the transform to one RGB triple.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            self.r[0] * rgb[0] + self.r[1] * rgb[1] + self.r[2] * rgb[2],
            self.g[0] * rgb[0] + self.g[1] * rgb[1] + self.g[2] * rgb[2],
            self.b[0] * rgb[0] + self.b[1] * rgb[1] + self.b[2] * rgb[2],
        ]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// One film stock: identity plus the parameter set the render pipeline
/// consumes. Presets are read-only; the catalog is built once and never
/// mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,

    pub saturation: f32,       // 1.0 is normal, 0.0 fully desaturated
    pub contrast: f32,         // 1.0 is normal, pivot at mid-gray
    pub brightness: f32,       // 0.0 is normal, additive
    pub warmth: f32,           // 0.0 is normal, signed, + pushes orange
    pub tint: f32,             // 0.0 is normal, signed, + pushes magenta
    pub vignette: f32,         // 0.0 to ~0.35, edge darkening strength
    pub grain: f32,            // 0.0 to ~0.35, noise strength
    pub channel_mix: ColorMatrix, // applied before all scalar adjustments
    pub grayscale: bool,       // hard mono switch once intensity passes 0.5
}

static CATALOG: [FilterPreset; 10] = [
    // Provia: the neutral baseline, first entry doubles as the fallback
    FilterPreset {
        id: "provia",
        name: "STD / PROVIA",
        description: "Standard. Neutral color reproduction.",
        saturation: 1.05,
        contrast: 1.02,
        brightness: 0.0,
        warmth: 0.0,
        tint: 0.0,
        vignette: 0.0,
        grain: 0.05,
        channel_mix: ColorMatrix::IDENTITY,
        grayscale: false,
    },
    // Velvia: saturated slide film, punchy primaries
    FilterPreset {
        id: "velvia",
        name: "VIVID / VELVIA",
        description: "Vibrant colors with high contrast. Great for landscapes.",
        saturation: 1.4,
        contrast: 1.15,
        brightness: -0.02,
        warmth: 0.05,
        tint: 0.1,
        vignette: 0.15,
        grain: 0.10,
        channel_mix: ColorMatrix {
            r: [1.1, -0.1, 0.0],
            g: [0.0, 1.1, -0.1],
            b: [0.0, 0.0, 1.1],
        },
        grayscale: false,
    },
    // Astia: gentle portrait rendering
    FilterPreset {
        id: "astia",
        name: "SOFT / ASTIA",
        description: "Soft tones and low contrast. Ideal for portraits.",
        saturation: 1.05,
        contrast: 0.95,
        brightness: 0.05,
        warmth: 0.05,
        tint: -0.05,
        vignette: 0.05,
        grain: 0.02,
        channel_mix: ColorMatrix {
            r: [0.95, 0.05, 0.0],
            g: [0.0, 1.0, 0.0],
            b: [0.0, 0.05, 0.95],
        },
        grayscale: false,
    },
    // Classic Chrome: muted reds, blues pulled toward cyan
    FilterPreset {
        id: "classic_chrome",
        name: "CLASSIC CHROME",
        description: "Documentary look. Muted colors and hard tonality.",
        saturation: 0.75,
        contrast: 1.15,
        brightness: -0.05,
        warmth: -0.1,
        tint: -0.1,
        vignette: 0.3,
        grain: 0.25,
        channel_mix: ColorMatrix {
            r: [0.9, 0.1, 0.0],
            g: [0.0, 1.0, 0.0],
            b: [0.1, 0.1, 0.8],
        },
        grayscale: false,
    },
    FilterPreset {
        id: "pro_neg_hi",
        name: "PRO NEG. Hi",
        description: "Good contrast for portraits with slightly desaturated look.",
        saturation: 0.9,
        contrast: 1.08,
        brightness: 0.0,
        warmth: 0.0,
        tint: 0.0,
        vignette: 0.1,
        grain: 0.15,
        channel_mix: ColorMatrix::IDENTITY,
        grayscale: false,
    },
    FilterPreset {
        id: "pro_neg_std",
        name: "PRO NEG. Std",
        description: "Very soft tonality with low saturation. Studio lighting.",
        saturation: 0.85,
        contrast: 0.9,
        brightness: 0.02,
        warmth: 0.02,
        tint: 0.0,
        vignette: 0.0,
        grain: 0.05,
        channel_mix: ColorMatrix::IDENTITY,
        grayscale: false,
    },
    // Classic Neg: strong color separation, heavy frame texture
    FilterPreset {
        id: "classic_neg",
        name: "CLASSIC NEG",
        description: "Superia-like. Hard contrast, nostalgic colors.",
        saturation: 0.85,
        contrast: 1.25,
        brightness: -0.05,
        warmth: 0.15,
        tint: 0.2,
        vignette: 0.35,
        grain: 0.35,
        channel_mix: ColorMatrix {
            r: [1.1, -0.2, 0.1],
            g: [-0.1, 1.1, 0.0],
            b: [0.0, 0.1, 0.9],
        },
        grayscale: false,
    },
    // Eterna: flat cinema profile with mild channel bleed
    FilterPreset {
        id: "eterna",
        name: "ETERNA",
        description: "Cinema look. Extremely low contrast and saturation.",
        saturation: 0.65,
        contrast: 0.8,
        brightness: 0.1,
        warmth: 0.0,
        tint: 0.0,
        vignette: 0.1,
        grain: 0.1,
        channel_mix: ColorMatrix {
            r: [0.9, 0.1, 0.0],
            g: [0.05, 0.9, 0.05],
            b: [0.0, 0.1, 0.9],
        },
        grayscale: false,
    },
    // Acros: mono stock, rows model its green-weighted spectral response
    FilterPreset {
        id: "acros",
        name: "ACROS",
        description: "Rich detail, sharp black and white with distinct grain.",
        saturation: 0.0,
        contrast: 1.2,
        brightness: 0.0,
        warmth: 0.0,
        tint: 0.0,
        vignette: 0.25,
        grain: 0.3,
        channel_mix: ColorMatrix {
            r: [0.3, 0.6, 0.1],
            g: [0.3, 0.6, 0.1],
            b: [0.3, 0.6, 0.1],
        },
        grayscale: true,
    },
    // Acros+R: mono with a red contrast filter in front of the lens
    FilterPreset {
        id: "acros_r",
        name: "ACROS+R",
        description: "Acros with Red Filter. Darker skies, higher contrast.",
        saturation: 0.0,
        contrast: 1.35,
        brightness: -0.05,
        warmth: 0.0,
        tint: 0.0,
        vignette: 0.3,
        grain: 0.3,
        channel_mix: ColorMatrix {
            r: [0.8, 0.2, 0.0],
            g: [0.8, 0.2, 0.0],
            b: [0.8, 0.2, 0.0],
        },
        grayscale: true,
    },
];

/// The full catalog in display order.
pub fn presets() -> &'static [FilterPreset] {
    &CATALOG
}

/// Looks up a preset by id. Unknown ids fall back to the first catalog
/// entry rather than failing; selection always resolves to something
/// renderable.
pub fn find_preset(id: &str) -> &'static FilterPreset {
    match CATALOG.iter().find(|p| p.id == id) {
        Some(preset) => preset,
        None => {
            log::debug!("unknown preset id '{}', using '{}'", id, CATALOG[0].id);
            &CATALOG[0]
        }
    }
}

/// First catalog entry, the neutral-ish default.
pub fn default_preset() -> &'static FilterPreset {
    &CATALOG[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let ids: HashSet<&str> = presets().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), presets().len());
    }

    #[test]
    fn test_catalog_shape() {
        assert_eq!(presets().len(), 10);
        assert_eq!(presets()[0].id, "provia");
        assert_eq!(default_preset().id, "provia");

        for preset in presets() {
            assert!(!preset.name.is_empty());
            assert!(!preset.description.is_empty());
            assert!(preset.saturation >= 0.0);
            assert!((0.0..=0.5).contains(&preset.vignette));
            assert!((0.0..=0.5).contains(&preset.grain));
        }
    }

    #[test]
    fn test_find_preset_known() {
        assert_eq!(find_preset("velvia").id, "velvia");
        assert_eq!(find_preset("acros_r").id, "acros_r");
    }

    #[test]
    fn test_find_preset_unknown_falls_back() {
        let preset = find_preset("does-not-exist");
        assert_eq!(preset.id, presets()[0].id);
    }

    #[test]
    fn test_matrix_apply_rows() {
        let m = ColorMatrix {
            r: [0.5, 0.25, 0.25],
            g: [0.0, 1.0, 0.0],
            b: [0.1, 0.2, 0.7],
        };
        let out = m.apply([1.0, 0.5, 0.0]);
        assert!((out[0] - 0.625).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[2] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_matrix_identity() {
        assert!(ColorMatrix::IDENTITY.is_identity());
        let rgb = [0.2, 0.4, 0.9];
        assert_eq!(ColorMatrix::IDENTITY.apply(rgb), rgb);

        // grayscale stocks carry a non-identity spectral matrix
        assert!(!find_preset("acros").channel_mix.is_identity());
    }
}
