//! Hue/chroma wheel geometry for the renderer.
//!
//! The wheel is split into [`HUE_SEGMENT_COUNT`] hue wedges, each drawn as
//! `SATURATION_SEGMENT_COUNT + 1` concentric rings. The outer ring shows
//! [`MAX_CHROMA`]; each inner ring steps chroma down by
//! `MAX_CHROMA / (SATURATION_SEGMENT_COUNT + 0.5)`. Angles are in radians,
//! screen convention (+y down), so hue increases counter-clockwise on
//! screen just like `+b` points up.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::Serialize;

use crate::color::oklab;
use crate::geometry::coords::{MAX_CHROMA, Viewport};

pub const HUE_SEGMENT_COUNT: usize = 24;
pub const SATURATION_SEGMENT_COUNT: usize = 4;
/// OKLCh lightness of every segment fill.
pub const SEGMENT_LIGHTNESS: f32 = 0.7;
/// Gap between the wheel rim and the hue labels.
pub const LABEL_OFFSET: f32 = 5.0;

/// One filled wedge of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelSegment {
    pub hue_deg: f32,
    /// 0 is the outermost ring.
    pub ring: usize,
    pub start_angle: f32,
    pub end_angle: f32,
    pub outer_radius: f32,
    pub chroma: f32,
    pub fill: [u8; 3],
}

/// A hue label around the rim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HueLabel {
    pub text: String,
    pub position: Vec2,
    pub rotation: f32,
}

fn hue_steps() -> impl Iterator<Item = (f32, f32)> {
    let step = TAU / HUE_SEGMENT_COUNT as f32;
    let step_deg = 360.0 / HUE_SEGMENT_COUNT as f32;
    (0..HUE_SEGMENT_COUNT).map(move |i| {
        let start = (-step / 2.0 - step * i as f32).rem_euclid(TAU);
        (i as f32 * step_deg, start)
    })
}

/// All wheel segments, hue-major, outer ring first.
pub fn segments(viewport: &Viewport) -> Vec<WheelSegment> {
    let max_radius = viewport.max_chroma_radius();
    let ring_width = max_radius / (SATURATION_SEGMENT_COUNT + 1) as f32;
    let chroma_step = MAX_CHROMA / (SATURATION_SEGMENT_COUNT as f32 + 0.5);
    let wedge = TAU / HUE_SEGMENT_COUNT as f32;

    hue_steps()
        .flat_map(|(hue_deg, start)| {
            (0..=SATURATION_SEGMENT_COUNT).map(move |ring| {
                let chroma = MAX_CHROMA - ring as f32 * chroma_step;
                WheelSegment {
                    hue_deg,
                    ring,
                    start_angle: start,
                    end_angle: start + wedge,
                    outer_radius: max_radius - ring_width * ring as f32,
                    chroma,
                    fill: oklab::lch_to_rgb8(SEGMENT_LIGHTNESS, chroma, hue_deg),
                }
            })
        })
        .collect()
}

/// Degree labels placed just outside the rim.
pub fn hue_labels(viewport: &Viewport) -> Vec<HueLabel> {
    let radius = viewport.max_chroma_radius() + LABEL_OFFSET;
    let center = viewport.center();
    hue_steps()
        .map(|(hue_deg, _)| {
            let angle = -hue_deg.to_radians();
            HueLabel {
                text: format!("{}°", hue_deg.round()),
                position: center + radius * Vec2::new(angle.cos(), angle.sin()),
                rotation: angle,
            }
        })
        .collect()
}
