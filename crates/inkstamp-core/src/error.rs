use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No base image loaded")]
    NoBaseImage,

    #[error("No watermark set")]
    NoWatermarkSet,

    #[error("Watermark text is empty")]
    EmptyText,

    #[error("Project error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StampError>;
