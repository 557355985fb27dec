//! Flatten-to-raster export and PNG encoding.

use crate::pixmap::PixmapTarget;
use sketchpad_core::{RasterError, RasterImage, RenderError, SerializableColor, Surface};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("Invalid raster: {0}")]
    Raster(#[from] RasterError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Flatten a surface into a single raster image.
///
/// Export never mutates the surface: history and the in-progress stroke
/// are left exactly as they were.
pub trait ExportRaster {
    /// Composite at the surface's pixel size onto a transparent canvas.
    fn export_raster(&self) -> Result<RasterImage, ExportError> {
        self.export_raster_with(SerializableColor::transparent())
    }

    /// Composite at the surface's pixel size onto a canvas cleared to `clear_color`.
    fn export_raster_with(&self, clear_color: SerializableColor) -> Result<RasterImage, ExportError>;

    /// Export and encode as PNG.
    fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(&self.export_raster()?)
    }
}

impl ExportRaster for Surface {
    fn export_raster_with(&self, clear_color: SerializableColor) -> Result<RasterImage, ExportError> {
        let mut target = PixmapTarget::new().with_clear_color(clear_color);
        self.render_to(&mut target)?;
        let raster = target.to_raster()?;
        log::debug!(
            "Exported {}x{} raster with {} strokes",
            raster.width(),
            raster.height(),
            self.strokes().len()
        );
        Ok(raster)
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(raster: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(raster.pixels())?;
        writer.finish()?;
    }

    Ok(png_data)
}
