//! Error types for image fetching and decoding

use thiserror::Error;

/// Errors that can occur while resolving an image reference
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported image reference: {image_ref}")]
    UnsupportedScheme { image_ref: String },

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for FetchError {
    fn from(e: image::ImageError) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.to_string())
    }
}

impl From<FetchError> for photoplane_core::Error {
    fn from(e: FetchError) -> Self {
        photoplane_core::Error::ImageLoad(e.to_string())
    }
}
