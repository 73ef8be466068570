//! Decoded image pixels handed to the render backend

use crate::{Error, Result};

/// Tightly packed 8-bit RGBA pixels, rows top to bottom
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Wrap an RGBA buffer, checking that its length matches the dimensions
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::InvalidData(format!(
                "RGBA buffer holds {} bytes, {}x{} needs {}",
                rgba.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// A single-colour image, mostly useful for tests and placeholders
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self { width, height, rgba }
    }

    /// Bytes per pixel row
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Pixel aspect ratio `width / height`
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_short_buffer() {
        assert!(ImageData::new(2, 2, vec![0; 15]).is_err());
        assert!(ImageData::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let img = ImageData::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(img.rgba.len(), 24);
        assert!(img.rgba.chunks(4).all(|px| px == [1, 2, 3, 4]));
        assert_eq!(img.bytes_per_row(), 12);
    }
}
