//! Image representation for the gamut pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GamutError;

/// Channel layout of an incoming 8-bit pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// 3 bytes per pixel, no alpha.
    Rgb8,
    /// 4 bytes per pixel, alpha last.
    Rgba8,
}

impl ChannelLayout {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb8 => write!(f, "RGB8"),
            Self::Rgba8 => write!(f, "RGBA8"),
        }
    }
}

/// Internal image representation. Always stored as gamma-encoded RGBA8,
/// row-major, alpha last.
///
/// A zero-size image stands in for "no image loaded".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamutImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// `width × height × 4` bytes.
    pub pixels: Vec<u8>,
}

impl GamutImage {
    /// Wrap a raw buffer. Bytes beyond the last pixel are dropped.
    pub fn new(
        width: u32,
        height: u32,
        mut pixels: Vec<u8>,
        layout: ChannelLayout,
    ) -> Result<Self, GamutError> {
        let expected = byte_len(width, height, layout)?;
        if pixels.len() < expected {
            return Err(GamutError::BufferTooShort {
                width,
                height,
                layout,
                expected,
                actual: pixels.len(),
            });
        }
        pixels.truncate(expected);
        let pixels = match layout {
            ChannelLayout::Rgba8 => pixels,
            ChannelLayout::Rgb8 => pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
        };
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The "no image" value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 4
    }

    /// RGBA of pixel `index` in row-major order.
    pub fn pixel(&self, index: usize) -> Option<[u8; 4]> {
        let px = self.pixels.get(index * 4..index * 4 + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into an `image` crate buffer for encoding.
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }
}

impl From<image::RgbaImage> for GamutImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

fn byte_len(width: u32, height: u32, layout: ChannelLayout) -> Result<usize, GamutError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(layout.bytes_per_pixel()))
        .ok_or(GamutError::DimensionsOverflow { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_buffer_gains_opaque_alpha() {
        let img = GamutImage::new(2, 1, vec![10, 20, 30, 40, 50, 60], ChannelLayout::Rgb8)
            .expect("valid buffer");
        assert_eq!(img.pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
        assert_eq!(img.pixel_count(), 2);
        assert_eq!(img.pixel(1), Some([40, 50, 60, 255]));
        assert_eq!(img.pixel(2), None);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let err = GamutImage::new(2, 2, vec![0; 15], ChannelLayout::Rgba8).unwrap_err();
        assert!(matches!(
            err,
            GamutError::BufferTooShort {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_bytes_are_dropped() {
        let img = GamutImage::new(1, 1, vec![1, 2, 3, 4, 5, 6], ChannelLayout::Rgba8)
            .expect("valid buffer");
        assert_eq!(img.pixels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_image() {
        assert!(GamutImage::empty().is_empty());
        let zero_width = GamutImage::new(0, 10, vec![], ChannelLayout::Rgba8).expect("valid");
        assert!(zero_width.is_empty());
    }

    #[test]
    fn test_rgba_image_roundtrip() {
        let src = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let img = GamutImage::from(src.clone());
        assert_eq!(img.width, 3);
        assert_eq!(img.into_rgba_image(), Some(src));
    }
}
