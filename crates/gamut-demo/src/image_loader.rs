//! Image loading and saving for the demo.

use std::path::Path;

use gamut_core::GamutImage;

/// Load an image from disk as RGBA8.
///
/// Supports common formats via the `image` crate. Higher bit depths are
/// reduced to 8 bits per channel.
pub fn load_image(path: &Path) -> Result<GamutImage, ImageLoadError> {
    let img = image::open(path).map_err(ImageLoadError::Decode)?;
    Ok(GamutImage::from(img.to_rgba8()))
}

/// Encode `image` to `path`; the format follows the file extension.
pub fn save_image(image: GamutImage, path: &Path) -> Result<(), ImageLoadError> {
    let (width, height) = (image.width, image.height);
    let rgba = image
        .into_rgba_image()
        .ok_or(ImageLoadError::Malformed { width, height })?;
    rgba.save(path).map_err(ImageLoadError::Encode)
}

/// Errors that can occur while loading or saving images.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("pixel buffer does not match {width}x{height}")]
    Malformed { width: u32, height: u32 },
}
