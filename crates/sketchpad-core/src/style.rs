//! Brush style attached to strokes.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Largest brush size accepted by the size setter.
pub const MAX_BRUSH_SIZE: f64 = 200.0;
/// Largest brush alpha accepted by the alpha setter.
pub const MAX_BRUSH_ALPHA: u8 = 255;
/// Thickness of a freshly created brush, in pixels.
pub const DEFAULT_THICKNESS: f64 = 20.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with its alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Color, thickness and opacity captured by a stroke when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Brush color. Its own alpha is ignored when painting; `opacity` wins.
    #[serde(default = "default_color")]
    pub color: SerializableColor,
    /// Line width in pixels.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Brush opacity, 0 (invisible) to 255 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

fn default_color() -> SerializableColor {
    SerializableColor::red()
}

fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

fn default_opacity() -> u8 {
    MAX_BRUSH_ALPHA
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            thickness: default_thickness(),
            opacity: default_opacity(),
        }
    }
}

impl StrokeStyle {
    pub fn new(color: impl Into<SerializableColor>, thickness: f64, opacity: u8) -> Self {
        Self {
            color: color.into(),
            thickness,
            opacity,
        }
    }

    /// Color actually laid down on the canvas: the brush RGB with the
    /// style's opacity as alpha.
    pub fn paint_color(&self) -> SerializableColor {
        self.color.with_alpha(self.opacity)
    }

    /// Paint color as a peniko Color.
    pub fn paint(&self) -> Color {
        self.paint_color().into()
    }
}

/// Clamp a requested brush size into `0..=MAX_BRUSH_SIZE`.
pub fn clamp_brush_size(size: f64) -> f64 {
    if size.is_nan() {
        return 0.0;
    }
    size.clamp(0.0, MAX_BRUSH_SIZE)
}

/// Clamp a requested brush alpha into `0..=255`.
pub fn clamp_brush_alpha(alpha: i32) -> u8 {
    alpha.clamp(0, i32::from(MAX_BRUSH_ALPHA)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, SerializableColor::red());
        assert_eq!(style.thickness, 20.0);
        assert_eq!(style.opacity, 255);
    }

    #[test]
    fn test_paint_color_uses_opacity() {
        let style = StrokeStyle::new(SerializableColor::new(10, 20, 30, 255), 4.0, 128);
        assert_eq!(style.paint_color(), SerializableColor::new(10, 20, 30, 128));
    }

    #[test]
    fn test_paint_matches_paint_color() {
        let style = StrokeStyle::new(SerializableColor::new(200, 100, 50, 10), 4.0, 64);
        let paint = style.paint();
        assert_eq!(SerializableColor::from(paint), style.paint_color());
        assert_eq!(paint.to_rgba8().a, 64);
    }

    #[test]
    fn test_clamp_brush_size() {
        assert_eq!(clamp_brush_size(-5.0), 0.0);
        assert_eq!(clamp_brush_size(500.0), 200.0);
        assert_eq!(clamp_brush_size(35.0), 35.0);
        assert_eq!(clamp_brush_size(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_brush_alpha() {
        assert_eq!(clamp_brush_alpha(-1), 0);
        assert_eq!(clamp_brush_alpha(300), 255);
        assert_eq!(clamp_brush_alpha(77), 77);
    }

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let color = SerializableColor::new(1, 2, 3, 4);
        let peniko_color: Color = color.into();
        assert_eq!(SerializableColor::from(peniko_color), color);
    }

    #[test]
    fn test_style_deserialize_fills_defaults() {
        let style: StrokeStyle = serde_json::from_str(r#"{"thickness": 3.0}"#).unwrap();
        assert_eq!(style.thickness, 3.0);
        assert_eq!(style.color, SerializableColor::red());
        assert_eq!(style.opacity, 255);
    }
}
