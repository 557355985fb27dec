//! Render target abstraction.

use crate::raster::RasterImage;
use crate::stroke::{PathSmoothing, Stroke};
use thiserror::Error;

/// Errors raised by a render target.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Render target is unavailable: {0}")]
    Unavailable(String),
    #[error("Render failed: {0}")]
    Failed(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Something a surface can be composited onto.
///
/// `Surface::render_to` calls `begin` once, then `draw_background` (if a
/// background is set), then `draw_stroke` for every committed stroke in
/// drawing order followed by the in-progress stroke, then `finish`.
/// Each stroke is drawn with its own style.
pub trait RenderTarget {
    /// Prepare a blank frame of the given pixel size.
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Draw the background raster at the origin, at its native size.
    fn draw_background(&mut self, raster: &RasterImage) -> RenderResult<()>;

    /// Draw one stroke.
    fn draw_stroke(&mut self, stroke: &Stroke, smoothing: PathSmoothing) -> RenderResult<()>;

    /// Called after the last stroke.
    fn finish(&mut self) -> RenderResult<()> {
        Ok(())
    }
}
