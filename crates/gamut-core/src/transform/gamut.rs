//! Interactive gamut transform state.
//!
//! Pointer drags translate the gamut, the wheel rotates it, and the wheel
//! with a modifier scales one axis. Accumulated values are never clamped
//! or wrapped: scale may cross zero (mirroring the gamut) and the angle
//! may grow past 360°.
//!
//! ```text
//!   begin_drag(A) ──→ drag_to(B)* ──→ end_drag(C)
//!        anchor = A     translate = base + Δ(A, B)
//!                                     base = translate = base + Δ(A, C)
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::matrix::AffineMatrix;
use crate::geometry::ab::Ab;
use crate::geometry::coords::Viewport;

/// Rotation per unmodified wheel tick, in degrees.
pub const WHEEL_ROTATION_STEP_DEG: f32 = 7.5;

/// Scale change per unit of wheel `delta_y` when a modifier is held.
pub const WHEEL_SCALE_STEP: f32 = 0.001;

/// Keyboard modifiers accompanying a wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift: scale along `a`.
    #[serde(default)]
    pub shift: bool,
    /// Alt or Ctrl: scale along `b`.
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
    };
}

/// Accumulated rotate/scale/translate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Rotation in degrees, unwrapped.
    pub angle_deg: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Chroma-plane offset applied after rotate/scale.
    pub translate: Ab,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translate: Ab::ORIGIN,
        }
    }
}

/// Owns the interactive transform and produces the affine matrix.
#[derive(Debug, Clone, Default)]
pub struct GamutTransform {
    state: TransformState,
    translate_base: Ab,
    anchor: Option<Vec2>,
    viewport: Viewport,
}

impl GamutTransform {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Translation committed by the last finished drag.
    pub fn translate_base(&self) -> Ab {
        self.translate_base
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Update the viewport used to convert drag deltas.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Start a drag at display point `point`.
    ///
    /// Calling this again before [`end_drag`](Self::end_drag) overwrites the
    /// anchor; the uncommitted translation is measured from the new anchor.
    pub fn begin_drag(&mut self, point: Vec2) {
        if self.anchor.is_some() {
            debug!(?point, "drag anchor overwritten");
        }
        self.anchor = Some(point);
    }

    /// Update the live translation while dragging. No-op when not dragging.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let delta = self.viewport.pointer_delta(anchor, point);
        self.state.translate = Ab::new(
            self.translate_base.a + delta.a,
            self.translate_base.b + delta.b,
        );
        true
    }

    /// Finish a drag at `point` and commit the translation.
    pub fn end_drag(&mut self, point: Vec2) -> bool {
        if !self.drag_to(point) {
            return false;
        }
        self.translate_base = self.state.translate;
        self.anchor = None;
        debug!(translate = ?self.state.translate, "drag committed");
        true
    }

    /// Apply one wheel event.
    ///
    /// Shift scales `a`, Alt/Ctrl scales `b`, otherwise the gamut rotates by
    /// ±[`WHEEL_ROTATION_STEP_DEG`] depending on the sign of `delta_y`.
    pub fn apply_wheel(&mut self, delta_y: f32, modifiers: Modifiers) {
        if modifiers.shift {
            self.state.scale_x += delta_y * WHEEL_SCALE_STEP;
        } else if modifiers.alt {
            self.state.scale_y += delta_y * WHEEL_SCALE_STEP;
        } else if delta_y > 0.0 {
            self.state.angle_deg += WHEEL_ROTATION_STEP_DEG;
        } else {
            self.state.angle_deg -= WHEEL_ROTATION_STEP_DEG;
        }
    }

    /// Zero the rotation, keeping scale and translation.
    pub fn reset_rotation(&mut self) {
        self.state.angle_deg = 0.0;
    }

    /// Compute the matrix for the currently displayed hull.
    ///
    /// The pivot is the bounding-box center of `hull`. An empty hull has no
    /// pivot, so the result is a pure translation.
    pub fn compute_matrix(&self, hull: &[Ab]) -> AffineMatrix {
        match pivot(hull) {
            Some(pivot) => AffineMatrix::about_pivot(
                pivot,
                self.state.angle_deg,
                self.state.scale_x,
                self.state.scale_y,
                self.state.translate,
            ),
            None => AffineMatrix::translation(self.state.translate),
        }
    }
}

/// Center of the axis-aligned bounding box of `points`.
pub fn pivot(points: &[Ab]) -> Option<Ab> {
    let first = points.first()?;
    let (mut min, mut max) = (first.to_vec2(), first.to_vec2());
    for p in &points[1..] {
        min = min.min(p.to_vec2());
        max = max.max(p.to_vec2());
    }
    Some(Ab::from(min + (max - min) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn viewport() -> Viewport {
        Viewport::new(600.0, 600.0)
    }

    #[test]
    fn test_default_state_yields_identity() {
        let t = GamutTransform::new(viewport());
        let hull = [Ab::new(-0.1, 0.0), Ab::new(0.2, 0.1), Ab::new(0.0, -0.15)];
        let m = t.compute_matrix(&hull);
        for p in hull {
            let q = m.apply(p);
            assert!((q.a - p.a).abs() < EPSILON && (q.b - p.b).abs() < EPSILON);
        }
    }

    #[test]
    fn test_pivot_is_bounding_box_center_not_centroid() {
        // Vertex mean would be (0.25, 0.25); the box center is (0.5, 0.5).
        let points = [Ab::new(0.0, 0.0), Ab::new(1.0, 0.0), Ab::new(0.0, 1.0), Ab::new(0.0, 0.0)];
        let p = pivot(&points).expect("non-empty");
        assert!((p.a - 0.5).abs() < EPSILON && (p.b - 0.5).abs() < EPSILON);
        assert!(pivot(&[]).is_none());
    }

    #[test]
    fn test_empty_hull_falls_back_to_translation() {
        let mut t = GamutTransform::new(viewport());
        t.apply_wheel(1.0, Modifiers::NONE);
        t.apply_wheel(100.0, Modifiers::SHIFT);
        t.begin_drag(Vec2::new(300.0, 300.0));
        t.end_drag(Vec2::new(330.0, 300.0));
        let m = t.compute_matrix(&[]);
        assert_eq!(m, AffineMatrix::translation(t.state().translate));
    }

    #[test]
    fn test_drag_commit_semantics() {
        let vp = viewport();
        let mut t = GamutTransform::new(vp);
        let (a, b, c) = (Vec2::new(300.0, 300.0), Vec2::new(320.0, 310.0), Vec2::new(350.0, 260.0));

        t.begin_drag(a);
        assert!(t.drag_to(b));
        // Live translation is not committed yet.
        assert_eq!(t.translate_base(), Ab::ORIGIN);
        assert!(t.end_drag(c));
        assert!(!t.is_dragging());

        let expected = vp.pointer_delta(a, c);
        assert!((t.translate_base().a - expected.a).abs() < EPSILON);
        assert!((t.translate_base().b - expected.b).abs() < EPSILON);

        // A second drag starts from its own anchor and builds on the base.
        let (d, e) = (Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0));
        t.begin_drag(d);
        t.drag_to(e);
        let step = vp.pointer_delta(d, e);
        assert!((t.state().translate.a - (expected.a + step.a)).abs() < EPSILON);
        assert!((t.state().translate.b - (expected.b + step.b)).abs() < EPSILON);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut t = GamutTransform::new(viewport());
        assert!(!t.drag_to(Vec2::new(10.0, 10.0)));
        assert!(!t.end_drag(Vec2::new(10.0, 10.0)));
        assert_eq!(t.state().translate, Ab::ORIGIN);
    }

    #[test]
    fn test_second_begin_overwrites_anchor() {
        let vp = viewport();
        let mut t = GamutTransform::new(vp);
        t.begin_drag(Vec2::new(0.0, 0.0));
        t.begin_drag(Vec2::new(50.0, 50.0));
        t.end_drag(Vec2::new(60.0, 50.0));
        let expected = vp.pointer_delta(Vec2::new(50.0, 50.0), Vec2::new(60.0, 50.0));
        assert!((t.translate_base().a - expected.a).abs() < EPSILON);
    }

    #[test]
    fn test_wheel_accumulates_without_clamping() {
        let mut t = GamutTransform::new(viewport());
        for _ in 0..60 {
            t.apply_wheel(3.0, Modifiers::NONE);
        }
        assert!((t.state().angle_deg - 450.0).abs() < EPSILON);
        t.apply_wheel(-3.0, Modifiers::NONE);
        t.apply_wheel(0.0, Modifiers::NONE);
        assert!((t.state().angle_deg - 435.0).abs() < EPSILON);

        for _ in 0..3 {
            t.apply_wheel(-500.0, Modifiers::SHIFT);
        }
        assert!((t.state().scale_x - (1.0 - 1.5)).abs() < EPSILON, "scale_x may go negative");
        t.apply_wheel(250.0, Modifiers::ALT);
        assert!((t.state().scale_y - 1.25).abs() < EPSILON);
        // Modified ticks never rotate.
        assert!((t.state().angle_deg - 435.0).abs() < EPSILON);
    }

    #[test]
    fn test_shift_takes_precedence_over_alt() {
        let mut t = GamutTransform::new(viewport());
        t.apply_wheel(100.0, Modifiers { shift: true, alt: true });
        assert!((t.state().scale_x - 1.1).abs() < EPSILON);
        assert!((t.state().scale_y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_reset_rotation_keeps_scale_and_translate() {
        let mut t = GamutTransform::new(viewport());
        t.apply_wheel(1.0, Modifiers::NONE);
        t.apply_wheel(200.0, Modifiers::ALT);
        t.reset_rotation();
        assert_eq!(t.state().angle_deg, 0.0);
        assert!((t.state().scale_y - 1.2).abs() < EPSILON);
    }
}
