//! Decoded raster images.

use crate::style::SerializableColor;
use thiserror::Error;

/// Raster construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("Raster dimensions {width}x{height} are too large")]
    TooLarge { width: u32, height: u32 },
}

/// Bytes per RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// A decoded image: straight-alpha RGBA8 pixels, row-major, no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

// Pixel data is too large to be useful in debug output.
impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

impl RasterImage {
    /// Wrap an RGBA8 buffer, checking that it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(RasterError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster filled with a single color.
    pub fn filled(width: u32, height: u32, color: SerializableColor) -> Result<Self, RasterError> {
        let len = buffer_len(width, height)?;
        let pixels = color
            .to_array()
            .into_iter()
            .cycle()
            .take(len)
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height) in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of the pixel at (x, y), or None outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some(SerializableColor::new(px[0], px[1], px[2], px[3]))
    }
}

fn buffer_len(width: u32, height: u32) -> Result<usize, RasterError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(RasterError::TooLarge { width, height })
}
