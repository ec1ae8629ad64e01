//! Reduce an image to a bounded set of chroma-plane points.
//!
//! Every `stride`-th pixel is converted to OKLab, where
//! `stride = max(1, ⌊w·h / SAMPLE_BUDGET⌋)`. Tiny images are sampled
//! exhaustively.

use tracing::debug;

use crate::color::oklab;
use crate::geometry::ab::Ab;
use crate::image::GamutImage;

/// Target number of samples per image.
pub const SAMPLE_BUDGET: usize = 4000;

/// Pixel stride used for an image with `pixel_count` pixels.
pub fn sample_stride(pixel_count: usize) -> usize {
    (pixel_count / SAMPLE_BUDGET).max(1)
}

/// Sample chroma points from `image`. Empty images yield no points.
pub fn sample_chroma_points(image: &GamutImage) -> Vec<Ab> {
    if image.is_empty() {
        return Vec::new();
    }
    let stride = sample_stride(image.width as usize * image.height as usize);
    let points: Vec<Ab> = image
        .pixels
        .chunks_exact(4)
        .step_by(stride)
        .map(|px| Ab::from(oklab::to_perceptual([px[0], px[1], px[2]].map(f32::from))))
        .collect();
    debug!(stride, samples = points.len(), "sampled image chroma");
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelLayout;

    #[test]
    fn test_stride_never_zero() {
        assert_eq!(sample_stride(0), 1);
        assert_eq!(sample_stride(10), 1);
        assert_eq!(sample_stride(SAMPLE_BUDGET * 3 + 5), 3);
    }

    #[test]
    fn test_small_image_sampled_exhaustively() {
        let image = GamutImage::new(3, 1, vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255], ChannelLayout::Rgba8)
            .expect("valid image");
        let points = sample_chroma_points(&image);
        assert_eq!(points.len(), 3);
        // Red sits at positive a, blue at negative b.
        assert!(points[0].a > 0.2);
        assert!(points[2].b < -0.2);
        assert!(points.iter().all(|p| p.l.is_some()));
    }

    #[test]
    fn test_large_image_respects_budget() {
        let (w, h) = (200u32, 100u32);
        let image = GamutImage::new(w, h, vec![90; (w * h * 4) as usize], ChannelLayout::Rgba8)
            .expect("valid image");
        let points = sample_chroma_points(&image);
        assert_eq!(sample_stride(20_000), 5);
        assert_eq!(points.len(), 4000);
    }

    #[test]
    fn test_empty_image_has_no_points() {
        assert!(sample_chroma_points(&GamutImage::empty()).is_empty());
    }
}
