//! Mapping between chroma-plane units and display pixels.
//!
//! ```text
//!   to_display:        center + radius × (value / max_value)
//!   from_display_delta: ((p2 − p1) / radius) × max_value
//! ```
//!
//! A negative `signed_radius` flips the axis. The vertical axis uses it to
//! turn math convention (+b up) into screen convention (+y down).
//!
//! Both functions require `signed_radius != 0`; a zero radius is a caller
//! configuration error and is not guarded here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ab::Ab;

/// Display margin around the chroma wheel, in display units.
pub const MARGIN: f32 = 20.0;

/// Chroma value mapped to the wheel's outer radius.
pub const MAX_CHROMA: f32 = 0.25;

/// Map a chroma-plane value onto one display axis.
#[inline]
pub fn to_display(value: f32, center: f32, signed_radius: f32, max_value: f32) -> f32 {
    center + signed_radius * (value / max_value)
}

/// Map a display-axis pointer delta back into chroma-plane units.
#[inline]
pub fn from_display_delta(p1: f32, p2: f32, signed_radius: f32, max_value: f32) -> f32 {
    ((p2 - p1) / signed_radius) * max_value
}

/// Display viewport holding the chroma wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Wheel center in display coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Display radius that [`MAX_CHROMA`] maps to.
    pub fn max_chroma_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0 - 2.0 * MARGIN
    }

    /// Chroma-plane point → display point, with the vertical axis flipped.
    pub fn to_display(&self, ab: Ab) -> Vec2 {
        let center = self.center();
        let radius = self.max_chroma_radius();
        Vec2::new(
            to_display(ab.a, center.x, radius, MAX_CHROMA),
            to_display(ab.b, center.y, -radius, MAX_CHROMA),
        )
    }

    /// Map a polygon into display space.
    pub fn polygon_to_display(&self, points: &[Ab]) -> Vec<Vec2> {
        points.iter().map(|&p| self.to_display(p)).collect()
    }

    /// Pointer drag from `p1` to `p2` (display) → chroma-plane delta.
    pub fn pointer_delta(&self, p1: Vec2, p2: Vec2) -> Ab {
        let radius = self.max_chroma_radius();
        Ab::new(
            from_display_delta(p1.x, p2.x, radius, MAX_CHROMA),
            from_display_delta(p1.y, p2.y, -radius, MAX_CHROMA),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_to_display_negative_radius_flips_axis() {
        assert!((to_display(0.25, 100.0, 50.0, 0.25) - 150.0).abs() < EPSILON);
        assert!((to_display(0.25, 100.0, -50.0, 0.25) - 50.0).abs() < EPSILON);
        assert!((to_display(0.0, 100.0, -50.0, 0.25) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_delta_mapping_inverts_display_mapping() {
        let cases = [
            (10.0_f32, 35.0_f32, 180.0_f32, 0.25_f32),
            (200.0, 120.0, -180.0, 0.25),
            (-5.0, 5.0, 42.5, 1.0),
            (0.0, 0.0, -3.0, 0.4),
        ];
        for (p1, p2, radius, max) in cases {
            let delta = from_display_delta(p1, p2, radius, max);
            let recovered = to_display(delta, 0.0, radius, max);
            assert!(
                (recovered - (p2 - p1)).abs() < EPSILON,
                "p1={p1} p2={p2} radius={radius}: recovered {recovered}"
            );
        }
    }

    #[test]
    fn test_viewport_geometry() {
        let vp = Viewport::new(1000.0, 600.0);
        assert_eq!(vp.center(), Vec2::new(500.0, 300.0));
        assert!((vp.max_chroma_radius() - 260.0).abs() < EPSILON);
    }

    #[test]
    fn test_viewport_maps_positive_b_upward() {
        let vp = Viewport::new(600.0, 600.0);
        let p = vp.to_display(Ab::new(0.0, MAX_CHROMA));
        assert!((p.x - 300.0).abs() < EPSILON);
        assert!((p.y - (300.0 - vp.max_chroma_radius())).abs() < EPSILON);
    }

    #[test]
    fn test_pointer_delta_roundtrips_through_display() {
        let vp = Viewport::new(640.0, 480.0);
        let start = Ab::new(0.02, -0.03);
        let end = Ab::new(-0.07, 0.11);
        let delta = vp.pointer_delta(vp.to_display(start), vp.to_display(end));
        assert!((delta.a - (end.a - start.a)).abs() < EPSILON);
        assert!((delta.b - (end.b - start.b)).abs() < EPSILON);
    }
}
