//! Gamut session: drives the engine from discrete UI events.
//!
//! The session holds the current mode, the hulls derived from the latest
//! image and pigment set, and the interactive transform. Every event
//! recomputes the matrix against the current hull and publishes it to the
//! [`MatrixSlot`], which the pixel remap stage reads. [`GamutSession::frame`]
//! returns everything the renderer needs to draw the wheel overlay.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GamutError;
use crate::geometry::ab::Ab;
use crate::geometry::coords::Viewport;
use crate::geometry::hull::convex_hull;
use crate::image::GamutImage;
use crate::pigments::{self, PIGMENTS, Pigment};
use crate::sampling::sample_chroma_points;
use crate::transform::gamut::{GamutTransform, Modifiers};
use crate::transform::matrix::{AffineMatrix, MatrixSlot};

/// Where the displayed gamut comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpMode {
    /// Hull of the loaded image's colors.
    #[default]
    ImageBased,
    /// No image gamut; the pigment overlay is the reference.
    PigmentBased,
    /// No reference gamut at all.
    Freestyle,
}

impl OpMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ImageBased => "image-based",
            Self::PigmentBased => "pigment-based",
            Self::Freestyle => "freestyle",
        }
    }
}

impl fmt::Display for OpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OpMode {
    type Err = GamutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image-based" => Ok(Self::ImageBased),
            "pigment-based" => Ok(Self::PigmentBased),
            "freestyle" => Ok(Self::Freestyle),
            other => Err(GamutError::UnknownMode(other.to_string())),
        }
    }
}

/// Pointer and wheel input, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    Wheel {
        delta_y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// A pigment dot for the marks overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PigmentMark {
    pub code: &'static str,
    pub name: &'static str,
    pub position: Vec2,
    pub swatch: [u8; 3],
}

/// Display-ready output of one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamutFrame {
    /// Transformed image gamut in display space. Empty unless drawable.
    pub gamut: Vec<Vec2>,
    /// Untransformed pigment gamut in display space, when toggled on.
    pub pigment_gamut: Vec<Vec2>,
    pub pigment_marks: Vec<PigmentMark>,
    pub matrix: AffineMatrix,
    pub generation: u64,
}

/// Minimum vertex count for a hull to be drawn as a polygon.
const DRAWABLE_VERTICES: usize = 3;

/// Event-driven session state.
#[derive(Debug)]
pub struct GamutSession {
    mode: OpMode,
    viewport: Viewport,
    transform: GamutTransform,
    image_hull: Vec<Ab>,
    pigments: Vec<Pigment>,
    pigment_hull: Vec<Ab>,
    show_pigment_gamut: bool,
    show_pigment_marks: bool,
    slot: MatrixSlot,
}

impl GamutSession {
    pub fn new(viewport: Viewport) -> Self {
        let mut session = Self {
            mode: OpMode::default(),
            viewport,
            transform: GamutTransform::new(viewport),
            image_hull: Vec::new(),
            pigments: Vec::new(),
            pigment_hull: Vec::new(),
            show_pigment_gamut: false,
            show_pigment_marks: false,
            slot: MatrixSlot::new(),
        };
        session.set_pigments(PIGMENTS.to_vec());
        session
    }

    pub fn mode(&self) -> OpMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn transform(&self) -> &GamutTransform {
        &self.transform
    }

    /// Handle for the remap stage; shares this session's published matrix.
    pub fn matrix_slot(&self) -> MatrixSlot {
        self.slot.clone()
    }

    /// Hull the transform currently pivots around.
    pub fn gamut_hull(&self) -> &[Ab] {
        match self.mode {
            OpMode::ImageBased => &self.image_hull,
            OpMode::PigmentBased | OpMode::Freestyle => &[],
        }
    }

    pub fn pigment_hull(&self) -> &[Ab] {
        &self.pigment_hull
    }

    /// The matrix for the current state, without publishing.
    pub fn matrix(&self) -> AffineMatrix {
        self.transform.compute_matrix(self.gamut_hull())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.transform.set_viewport(viewport);
        self.publish();
    }

    /// Switch mode. Rotation resets; scale and translation persist.
    pub fn set_mode(&mut self, mode: OpMode) {
        info!(%mode, "mode changed");
        self.mode = mode;
        self.transform.reset_rotation();
        self.publish();
    }

    /// Rebuild the image gamut from a newly loaded image.
    pub fn set_image(&mut self, image: &GamutImage) {
        let points = sample_chroma_points(image);
        self.image_hull = convex_hull(&points);
        info!(
            width = image.width,
            height = image.height,
            hull = self.image_hull.len(),
            "image gamut rebuilt"
        );
        self.transform.reset_rotation();
        self.publish();
    }

    pub fn clear_image(&mut self) {
        self.set_image(&GamutImage::empty());
    }

    /// Replace the pigment set and rebuild its hull.
    pub fn set_pigments(&mut self, pigments: Vec<Pigment>) {
        self.pigment_hull = convex_hull(&pigments::pigment_points(&pigments));
        debug!(
            pigments = pigments.len(),
            hull = self.pigment_hull.len(),
            "pigment gamut rebuilt"
        );
        self.pigments = pigments;
        self.publish();
    }

    pub fn set_pigment_visibility(&mut self, show_gamut: bool, show_marks: bool) {
        self.show_pigment_gamut = show_gamut;
        self.show_pigment_marks = show_marks;
    }

    pub fn pointer_down(&mut self, point: Vec2) {
        self.transform.begin_drag(point);
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        if self.transform.drag_to(point) {
            self.publish();
        }
    }

    pub fn pointer_up(&mut self, point: Vec2) {
        if self.transform.end_drag(point) {
            self.publish();
        }
    }

    pub fn wheel(&mut self, delta_y: f32, modifiers: Modifiers) {
        self.transform.apply_wheel(delta_y, modifiers);
        self.publish();
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
            InputEvent::Wheel { delta_y, modifiers } => self.wheel(delta_y, modifiers),
        }
    }

    fn publish(&self) -> u64 {
        self.slot.publish(self.matrix())
    }

    /// Everything the overlay renderer draws, computed from the published
    /// matrix.
    pub fn frame(&self) -> GamutFrame {
        let snapshot = self.slot.snapshot();
        let hull = self.gamut_hull();

        let gamut = if hull.len() >= DRAWABLE_VERTICES {
            self.viewport
                .polygon_to_display(&snapshot.matrix.apply_all(hull))
        } else {
            Vec::new()
        };

        let pigment_gamut =
            if self.show_pigment_gamut && self.pigment_hull.len() >= DRAWABLE_VERTICES {
                self.viewport.polygon_to_display(&self.pigment_hull)
            } else {
                Vec::new()
            };

        let pigment_marks = if self.show_pigment_marks {
            pigments::visible(&self.pigments)
                .map(|p| PigmentMark {
                    code: p.code,
                    name: p.name,
                    position: self.viewport.to_display(p.ab),
                    swatch: p.swatch_rgb(),
                })
                .collect()
        } else {
            Vec::new()
        };

        GamutFrame {
            gamut,
            pigment_gamut,
            pigment_marks,
            matrix: snapshot.matrix,
            generation: snapshot.generation,
        }
    }
}
