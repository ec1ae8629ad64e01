//! Static catalog of watercolor pigments placed in the OKLab chroma plane.
//!
//! Each entry carries its chroma-plane position with lightness, the polar
//! hue/chroma used to paint its swatch, a Colour Index code, a display
//! name, and whether it is hidden from the marks overlay by default.

use serde::Serialize;

use crate::color::oklab;
use crate::geometry::ab::Ab;

/// One catalog pigment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pigment {
    /// Colour Index code, e.g. `PB29`.
    pub code: &'static str,
    pub name: &'static str,
    /// Chroma-plane position; `l` holds the masstone lightness.
    pub ab: Ab,
    /// Swatch hue in degrees.
    pub hue_deg: f32,
    /// Swatch chroma.
    pub chroma: f32,
    pub hide_by_default: bool,
}

impl Pigment {
    /// Masstone lightness, falling back to mid-gray.
    pub fn lightness(&self) -> f32 {
        self.ab.l.unwrap_or(0.5)
    }

    /// Swatch color for marks and legends.
    pub fn swatch_rgb(&self) -> [u8; 3] {
        oklab::lch_to_rgb8(self.lightness(), self.chroma, self.hue_deg)
    }
}

#[allow(clippy::too_many_arguments)]
const fn pigment(
    code: &'static str,
    name: &'static str,
    a: f32,
    b: f32,
    l: f32,
    hue_deg: f32,
    chroma: f32,
    hide_by_default: bool,
) -> Pigment {
    Pigment {
        code,
        name,
        ab: Ab::with_lightness(a, b, l),
        hue_deg,
        chroma,
        hide_by_default,
    }
}

/// The built-in pigment catalog.
pub const PIGMENTS: &[Pigment] = &[
    pigment("PY3", "Hansa Yellow Light", -0.0362, 0.1689, 0.8964, 102.1, 0.1727, false),
    pigment("PY97", "Hansa Yellow Medium", 0.0040, 0.1588, 0.8319, 88.6, 0.1589, false),
    pigment("PO73", "Pyrrol Orange", 0.1357, 0.1174, 0.6573, 40.9, 0.1794, false),
    pigment("PR255", "Pyrrol Scarlet", 0.1721, 0.0951, 0.5860, 28.9, 0.1967, false),
    pigment("PR254", "Pyrrol Red", 0.1799, 0.0836, 0.5393, 24.9, 0.1984, false),
    pigment("PV19", "Quinacridone Rose", 0.1824, 0.0214, 0.5481, 6.7, 0.1837, false),
    pigment("PR122", "Quinacridone Magenta", 0.1688, 0.0003, 0.4962, 0.1, 0.1688, false),
    pigment("PV23", "Carbazole Violet", 0.0620, -0.0901, 0.3584, 304.5, 0.1094, false),
    pigment("PB29", "French Ultramarine", 0.0035, -0.1530, 0.4052, 271.3, 0.1531, false),
    pigment("PB15:3", "Phthalo Blue (Green Shade)", -0.0361, -0.1002, 0.4092, 250.2, 0.1065, false),
    pigment("PB15:1", "Phthalo Blue (Red Shade)", -0.0150, -0.1379, 0.3936, 263.8, 0.1387, true),
    pigment("PG7", "Phthalo Green (Blue Shade)", -0.0845, -0.0006, 0.4668, 180.4, 0.0845, false),
    pigment("PG36", "Phthalo Green (Yellow Shade)", -0.0992, 0.0367, 0.5164, 159.7, 0.1057, true),
    pigment("PY150", "Nickel Azo Yellow", 0.0159, 0.1417, 0.7510, 83.6, 0.1426, true),
    pigment("PBr7", "Burnt Sienna", 0.0684, 0.0694, 0.4805, 45.4, 0.0975, true),
    pigment("PR101", "Indian Red", 0.0844, 0.0457, 0.4396, 28.4, 0.0960, true),
    pigment("PBk9", "Ivory Black", 0.0018, 0.0043, 0.2782, 67.6, 0.0047, true),
    pigment("PW6", "Titanium White", -0.0009, 0.0067, 0.9575, 97.4, 0.0067, true),
];

/// Chroma-plane positions of `pigments`, in catalog order.
pub fn pigment_points(pigments: &[Pigment]) -> Vec<Ab> {
    pigments.iter().map(|p| p.ab).collect()
}

/// Pigments shown in the marks overlay.
pub fn visible(pigments: &[Pigment]) -> impl Iterator<Item = &Pigment> {
    pigments.iter().filter(|p| !p.hide_by_default)
}
