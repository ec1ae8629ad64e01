//! OKLab ⇄ gamma-encoded sRGB conversion.
//!
//! # Forward
//! ```text
//!   sRGB ──→ to_linear ──→ M1 (linear → LMS) ──→ cbrt ──→ M2 (LMS' → Lab)
//! ```
//!
//! # Inverse
//! ```text
//!   Lab ──→ M2⁻¹ ──→ cube ──→ M1⁻¹ ──→ to_encoded ──→ clamp ──→ sRGB
//! ```
//!
//! The matrices are Björn Ottosson's published OKLab constants and are
//! duplicated verbatim in `remap_gamut.wgsl`.

use serde::{Deserialize, Serialize};

use super::transfer;

/// Linear sRGB → LMS.
pub const LINEAR_TO_LMS: [[f32; 3]; 3] = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

/// Nonlinear LMS → Lab.
pub const LMS_TO_LAB: [[f32; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

/// Lab → nonlinear LMS.
pub const LAB_TO_LMS: [[f32; 3]; 3] = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];

/// LMS → linear sRGB.
pub const LMS_TO_LINEAR: [[f32; 3]; 3] = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

/// A color in OKLab: perceptual lightness `l` plus the chroma-plane
/// coordinates `a` (green–red) and `b` (blue–yellow).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oklab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Oklab {
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Build from polar OKLCh: chroma `c` and hue `h_deg` in degrees.
    pub fn from_lch(l: f32, c: f32, h_deg: f32) -> Self {
        let (sin, cos) = h_deg.to_radians().sin_cos();
        Self::new(l, c * cos, c * sin)
    }

    /// Chroma (distance from the neutral axis).
    pub fn chroma(&self) -> f32 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, `[0, 360)`.
    pub fn hue_deg(&self) -> f32 {
        self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
    }
}

#[inline]
fn mul(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Linear-light sRGB → OKLab.
pub fn from_linear(rgb: [f32; 3]) -> Oklab {
    let lms = mul(&LINEAR_TO_LMS, rgb).map(f32::cbrt);
    let [l, a, b] = mul(&LMS_TO_LAB, lms);
    Oklab { l, a, b }
}

/// OKLab → linear-light sRGB. May be out of `[0, 1]` for out-of-gamut colors.
pub fn to_linear(lab: Oklab) -> [f32; 3] {
    let lms = mul(&LAB_TO_LMS, [lab.l, lab.a, lab.b]).map(|c| c * c * c);
    mul(&LMS_TO_LINEAR, lms)
}

/// Normalized gamma-encoded sRGB (`[0, 1]` per channel) → OKLab.
///
/// This is the per-pixel entry point mirrored by the GPU shader.
pub fn from_unit_rgb(rgb: [f32; 3]) -> Oklab {
    from_linear(rgb.map(transfer::to_linear))
}

/// OKLab → normalized gamma-encoded sRGB, clamped to `[0, 1]`.
pub fn to_unit_rgb(lab: Oklab) -> [f32; 3] {
    to_linear(lab).map(|c| transfer::to_encoded(c).clamp(0.0, 1.0))
}

/// Gamma-encoded 8-bit-scale sRGB (`0..=255`) → OKLab.
///
/// Inputs outside `0..=255` are clamped first.
pub fn to_perceptual(rgb: [f32; 3]) -> Oklab {
    from_unit_rgb(rgb.map(|c| c.clamp(0.0, 255.0) / 255.0))
}

/// OKLab → gamma-encoded sRGB on the `0..=255` scale, clamped but not rounded.
pub fn to_rgb(lab: Oklab) -> [f32; 3] {
    to_unit_rgb(lab).map(|c| c * 255.0)
}

/// Quantize a normalized channel to 8 bits.
///
/// Matches WGSL `pack4x8unorm`: `round(clamp(c, 0, 1) × 255)`.
#[inline]
pub fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// OKLCh → 8-bit sRGB, used for swatch and wheel segment fills.
pub fn lch_to_rgb8(l: f32, c: f32, h_deg: f32) -> [u8; 3] {
    to_unit_rgb(Oklab::from_lch(l, c, h_deg)).map(quantize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::FromColor;

    const EPSILON: f32 = 1e-4;

    fn assert_rgb_roundtrip(rgb: [u8; 3]) {
        let lab = to_perceptual(rgb.map(f32::from));
        let back = to_rgb(lab);
        for c in 0..3 {
            let err = (back[c] - rgb[c] as f32).abs();
            assert!(
                err <= 1.0,
                "{rgb:?} channel {c}: back={:.4} err={err:.4}",
                back[c]
            );
        }
    }

    #[test]
    fn test_roundtrip_web_safe_colors() {
        let steps = [0u8, 51, 102, 153, 204, 255];
        for &r in &steps {
            for &g in &steps {
                for &b in &steps {
                    assert_rgb_roundtrip([r, g, b]);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_pseudo_random_colors() {
        // Deterministic LCG so failures are reproducible.
        let mut state: u32 = 0x1234_5678;
        for _ in 0..2000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [r, g, b, _] = state.to_le_bytes();
            assert_rgb_roundtrip([r, g, b]);
        }
    }

    #[test]
    fn test_white_and_black_are_achromatic() {
        let white = to_perceptual([255.0, 255.0, 255.0]);
        assert!((white.l - 1.0).abs() < 1e-3, "white L = {}", white.l);
        assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);

        let black = to_perceptual([0.0, 0.0, 0.0]);
        assert!(black.l.abs() < EPSILON);
        assert!(black.a.abs() < EPSILON && black.b.abs() < EPSILON);
    }

    #[test]
    fn test_matches_reference_implementation() {
        for rgb in [[0.8_f32, 0.3, 0.1], [0.1, 0.6, 0.9], [0.5, 0.5, 0.2]] {
            let ours = from_unit_rgb(rgb);
            let reference = palette::Oklab::from_color(
                palette::Srgb::new(rgb[0], rgb[1], rgb[2]).into_linear(),
            );
            assert!((ours.l - reference.l).abs() < 2e-3, "{rgb:?} L");
            assert!((ours.a - reference.a).abs() < 2e-3, "{rgb:?} a");
            assert!((ours.b - reference.b).abs() < 2e-3, "{rgb:?} b");
        }
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let over = to_perceptual([300.0, -20.0, 128.0]);
        let clamped = to_perceptual([255.0, 0.0, 128.0]);
        assert_eq!(over, clamped);

        let rgb = to_rgb(Oklab::new(0.7, 0.6, -0.6));
        for c in rgb {
            assert!((0.0..=255.0).contains(&c), "channel {c} out of range");
        }
    }

    #[test]
    fn test_lch_polar_roundtrip() {
        let lab = Oklab::from_lch(0.7, 0.15, 120.0);
        assert!((lab.chroma() - 0.15).abs() < EPSILON);
        assert!((lab.hue_deg() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_quantize_rounds_half_up() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(2.0), 255);
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(128.0 / 255.0), 128);
    }
}
