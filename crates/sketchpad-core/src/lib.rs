//! Sketchpad Core Library
//!
//! Platform-agnostic drawing surface: freehand strokes captured from pointer
//! gestures, an undo/redo history of strokes, and composition over an
//! optional background image. No I/O happens here; decoding, encoding and
//! rasterization live in `sketchpad-render`.

pub mod config;
pub mod gesture;
pub mod history;
pub mod raster;
pub mod render;
pub mod stroke;
pub mod style;
pub mod surface;

pub use config::SurfaceConfig;
pub use gesture::{GestureController, GestureState, PointerEvent};
pub use history::{HistoryStack, RedoPolicy};
pub use raster::{RasterError, RasterImage};
pub use render::{RenderError, RenderResult, RenderTarget};
pub use stroke::{PathSmoothing, Stroke};
pub use style::{SerializableColor, StrokeStyle};
pub use surface::{Surface, SurfaceError, SurfaceResult};

// Re-exported so callers can build points without naming kurbo.
pub use kurbo::Point;
