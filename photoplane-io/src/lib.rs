//! Image fetching and decoding for photoplane
//!
//! Resolves an image reference (path, `file://`, `http(s)://`) to encoded
//! bytes through a [`FetcherRegistry`] and decodes them into
//! [`photoplane_core::ImageData`].

pub mod decode;
pub mod error;
pub mod registry;

pub use decode::{decode_image, fit_within};
pub use error::*;
pub use registry::{FetcherRegistry, FileFetcher, HttpFetcher, ImageFetcher, MemoryFetcher};

use photoplane_core::ImageData;

/// Fetch and decode `image_ref`. Blocks the calling thread.
pub fn load_image(registry: &FetcherRegistry, image_ref: &str, max_dimension: u32) -> Result<ImageData, FetchError> {
    let bytes = registry.fetch(image_ref)?;
    log::debug!("Fetched {} bytes for {}", bytes.len(), image_ref);
    decode_image(&bytes, max_dimension)
}
