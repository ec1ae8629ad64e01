use crate::image::ChannelLayout;

#[derive(Debug, thiserror::Error)]
pub enum GamutError {
    #[error("pixel buffer too short for {width}x{height} {layout}: need {expected} bytes, got {actual}")]
    BufferTooShort {
        width: u32,
        height: u32,
        layout: ChannelLayout,
        expected: usize,
        actual: usize,
    },
    #[error("image dimensions overflow: {width}x{height}")]
    DimensionsOverflow { width: u32, height: u32 },
    #[error("unknown mode {0:?}; expected image-based, pigment-based, or freestyle")]
    UnknownMode(String),
}
