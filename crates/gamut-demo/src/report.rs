//! JSON summary written next to the remapped image.

use gamut_core::{Ab, AffineMatrix, GamutFrame, GamutSession, OpMode, TransformState, Viewport};
use serde::Serialize;

/// Which remap path produced the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gpu,
    Cpu,
}

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub mode: OpMode,
    pub viewport: Viewport,
    pub backend: Backend,
    pub state: TransformState,
    pub matrix: AffineMatrix,
    /// Untransformed image gamut in the chroma plane.
    pub hull: Vec<Ab>,
    /// Image gamut after the matrix, in the chroma plane.
    pub transformed_hull: Vec<Ab>,
    pub frame: GamutFrame,
}

impl DemoReport {
    pub fn from_session(session: &GamutSession, backend: Backend) -> Self {
        let matrix = session.matrix();
        let hull = session.gamut_hull().to_vec();
        Self {
            mode: session.mode(),
            viewport: *session.viewport(),
            backend,
            state: *session.transform().state(),
            matrix,
            transformed_hull: matrix.apply_all(&hull),
            hull,
            frame: session.frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gamut_core::InputEvent;
    use gamut_core::image::ChannelLayout;
    use gamut_core::GamutImage;

    use super::*;

    #[test]
    fn test_report_serializes_session_state() {
        let mut session = GamutSession::new(Viewport::default());
        let image = GamutImage::new(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0],
            ChannelLayout::Rgb8,
        )
        .expect("valid image");
        session.set_image(&image);
        session.handle(InputEvent::Wheel {
            delta_y: 1.0,
            modifiers: Default::default(),
        });

        let report = DemoReport::from_session(&session, Backend::Cpu);
        assert_eq!(report.hull.len(), report.transformed_hull.len());
        assert_eq!(report.state.angle_deg, 7.5);

        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["backend"], "cpu");
        assert_eq!(json["mode"], "image-based");
        assert!(json["matrix"]["tx"].is_number());
    }
}
