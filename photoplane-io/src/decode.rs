//! Image decoding into RGBA pixels

use image::imageops::FilterType;
use photoplane_core::ImageData;

use crate::error::FetchError;

/// Decode any format the `image` crate understands.
///
/// Images with a side longer than `max_dimension` are downscaled, keeping
/// their aspect ratio, so the result always fits a GPU texture.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> Result<ImageData, FetchError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(FetchError::Decode(format!("image has zero extent ({}x{})", width, height)));
    }

    let rgba = match fit_within(width, height, max_dimension) {
        Some((w, h)) => {
            log::debug!("Downscaling {}x{} image to {}x{}", width, height, w, h);
            image::imageops::resize(&decoded.to_rgba8(), w, h, FilterType::Triangle)
        }
        None => decoded.to_rgba8(),
    };

    let (width, height) = rgba.dimensions();
    ImageData::new(width, height, rgba.into_raw()).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Target size for an image that exceeds `max_dimension`, or `None` if it fits
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if max_dimension == 0 || longest <= max_dimension {
        return None;
    }
    let scale = max_dimension as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_dimension);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_dimension);
    Some((w, h))
}
