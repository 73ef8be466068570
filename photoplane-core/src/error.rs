//! Error types for photoplane

use thiserror::Error;

/// Main error type for photoplane operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Image load failed: {0}")]
    ImageLoad(String),

    #[error("Container unavailable: {0}")]
    ContainerUnavailable(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),
}

impl Error {
    /// Whether this error came from resolving or decoding an image
    pub fn is_image_load(&self) -> bool {
        matches!(self, Error::ImageLoad(_))
    }
}

/// Result type alias for photoplane operations
pub type Result<T> = std::result::Result<T, Error>;
