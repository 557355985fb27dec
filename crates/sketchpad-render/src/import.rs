//! Background image decoding.

use sketchpad_core::{RasterError, RasterImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a background image.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Decoded image is unusable: {0}")]
    Raster(#[from] RasterError),
}

/// Decode PNG, JPEG or WebP bytes into an RGBA8 raster at native size.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, ImportError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    log::debug!("Decoded {width}x{height} image from {} bytes", bytes.len());
    Ok(RasterImage::new(width, height, decoded.into_raw())?)
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> Result<RasterImage, ImportError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raster = decode_image(&bytes)?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}
