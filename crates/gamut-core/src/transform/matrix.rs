//! 2D affine matrix shared by the hull and pixel remap paths.
//!
//! Layout follows the `(a, b, c, d, tx, ty)` convention:
//! ```text
//!   | a  c  tx |     a' = a·A + b·C + Tx
//!   | b  d  ty |     b' = a·B + b·D + Ty
//! ```

use std::sync::Arc;

use glam::{Affine2, Mat2, Vec2};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::oklab::Oklab;
use crate::geometry::ab::Ab;

/// Six-value affine transform of the chroma plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Pure translation by `t`.
    pub const fn translation(t: Ab) -> Self {
        Self {
            tx: t.a,
            ty: t.b,
            ..Self::IDENTITY
        }
    }

    /// Compose: move `pivot` to the origin, scale by `(scale_x, scale_y)`,
    /// rotate by `angle_deg`, move back to `pivot`, then translate.
    pub fn about_pivot(
        pivot: Ab,
        angle_deg: f32,
        scale_x: f32,
        scale_y: f32,
        translate: Ab,
    ) -> Self {
        let pivot = pivot.to_vec2();
        let affine = Affine2::from_translation(pivot + translate.to_vec2())
            * Affine2::from_angle(angle_deg.to_radians())
            * Affine2::from_scale(Vec2::new(scale_x, scale_y))
            * Affine2::from_translation(-pivot);
        affine.into()
    }

    /// Transform a chroma point. Lightness passes through.
    #[inline]
    pub fn apply(&self, p: Ab) -> Ab {
        Ab {
            a: p.a * self.a + p.b * self.c + self.tx,
            b: p.a * self.b + p.b * self.d + self.ty,
            l: p.l,
        }
    }

    /// Transform every point of a polygon.
    pub fn apply_all(&self, points: &[Ab]) -> Vec<Ab> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Per-pixel form: transform the chroma of an OKLab color, keep `L`.
    #[inline]
    pub fn apply_lab(&self, lab: Oklab) -> Oklab {
        Oklab {
            l: lab.l,
            a: lab.a * self.a + lab.b * self.c + self.tx,
            b: lab.a * self.b + lab.b * self.d + self.ty,
        }
    }

    /// `[a, b, c, d, tx, ty]`.
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine2> for AffineMatrix {
    fn from(m: Affine2) -> Self {
        Self {
            a: m.matrix2.x_axis.x,
            b: m.matrix2.x_axis.y,
            c: m.matrix2.y_axis.x,
            d: m.matrix2.y_axis.y,
            tx: m.translation.x,
            ty: m.translation.y,
        }
    }
}

impl From<AffineMatrix> for Affine2 {
    fn from(m: AffineMatrix) -> Self {
        Affine2::from_mat2_translation(
            Mat2::from_cols(Vec2::new(m.a, m.b), Vec2::new(m.c, m.d)),
            Vec2::new(m.tx, m.ty),
        )
    }
}

/// A published matrix together with its publication counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixSnapshot {
    pub matrix: AffineMatrix,
    pub generation: u64,
}

/// Publication slot for the current matrix.
///
/// Writers replace the whole matrix atomically; readers take a copy before
/// a remap pass, so a pass never observes a partial update. Clones share
/// the same slot.
#[derive(Debug, Clone)]
pub struct MatrixSlot {
    inner: Arc<RwLock<MatrixSnapshot>>,
}

impl MatrixSlot {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MatrixSnapshot {
                matrix: AffineMatrix::IDENTITY,
                generation: 0,
            })),
        }
    }

    /// Replace the published matrix. Returns the new generation.
    pub fn publish(&self, matrix: AffineMatrix) -> u64 {
        let mut slot = self.inner.write();
        slot.matrix = matrix;
        slot.generation += 1;
        trace!(generation = slot.generation, ?matrix, "matrix published");
        slot.generation
    }

    /// Copy of the latest published matrix.
    pub fn snapshot(&self) -> MatrixSnapshot {
        *self.inner.read()
    }

    pub fn matrix(&self) -> AffineMatrix {
        self.inner.read().matrix
    }
}

impl Default for MatrixSlot {
    fn default() -> Self {
        Self::new()
    }
}
