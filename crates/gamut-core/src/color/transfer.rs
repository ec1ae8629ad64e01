//! sRGB transfer function (IEC 61966-2-1).
//!
//! Converts between gamma-encoded channel values and linear light. Both
//! directions operate on normalized `[0, 1]` values.
//!
//! ```text
//! to_linear:   V <  0.04045   → V / 12.92
//!              V >= 0.04045   → ((V + 0.055) / 1.055) ^ 2.4
//!
//! to_encoded:  L <  0.0031308 → L × 12.92
//!              L >= 0.0031308 → 1.055 × L^(1/2.4) − 0.055
//! ```

/// Encoded threshold below which the curve is linear.
pub const ENCODED_CUT: f32 = 0.04045;
/// Linear threshold below which the curve is linear.
pub const LINEAR_CUT: f32 = 0.003_130_8;

/// Gamma-decode a normalized sRGB channel to linear light.
#[inline]
pub fn to_linear(encoded: f32) -> f32 {
    if encoded >= ENCODED_CUT {
        ((encoded + 0.055) / 1.055).powf(2.4)
    } else {
        encoded / 12.92
    }
}

/// Gamma-encode a linear-light channel to normalized sRGB.
#[inline]
pub fn to_encoded(linear: f32) -> f32 {
    if linear >= LINEAR_CUT {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * linear
    }
}
