//! Sketchpad Render Library
//!
//! CPU rasterization of a [`sketchpad_core::Surface`] using tiny-skia, plus
//! the raster codecs the surface needs at its edges: PNG encoding for
//! export and image decoding for background import.

mod export;
mod import;
mod pixmap;

pub use export::{ExportError, ExportRaster, encode_png};
pub use import::{ImportError, decode_image, load_image};
pub use pixmap::PixmapTarget;
