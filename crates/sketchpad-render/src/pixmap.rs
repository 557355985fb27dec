//! tiny-skia render target.

use kurbo::{BezPath, PathEl};
use sketchpad_core::{
    PathSmoothing, RasterImage, RenderError, RenderResult, RenderTarget, SerializableColor, Stroke,
};
use tiny_skia::{
    Color, ColorU8, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Stroke as SkiaStroke, Transform,
};

/// Renders a surface into an RGBA pixmap.
#[derive(Debug, Clone)]
pub struct PixmapTarget {
    pixmap: Option<Pixmap>,
    /// Color the frame is cleared to before the background is drawn.
    clear_color: SerializableColor,
}

impl Default for PixmapTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapTarget {
    /// A target that clears to transparent.
    pub fn new() -> Self {
        Self {
            pixmap: None,
            clear_color: SerializableColor::transparent(),
        }
    }

    /// Set the clear color.
    pub fn with_clear_color(mut self, color: SerializableColor) -> Self {
        self.clear_color = color;
        self
    }

    /// The last rendered frame, if any.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Copy the last frame out as straight-alpha RGBA8.
    pub fn to_raster(&self) -> RenderResult<RasterImage> {
        let pixmap = self.frame()?;
        let pixels = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RasterImage::new(pixmap.width(), pixmap.height(), pixels)
            .map_err(|e| RenderError::Failed(e.to_string()))
    }

    fn frame(&self) -> RenderResult<&Pixmap> {
        self.pixmap
            .as_ref()
            .ok_or_else(|| RenderError::Unavailable("no frame has been started".to_string()))
    }

    fn frame_mut(&mut self) -> RenderResult<&mut Pixmap> {
        self.pixmap
            .as_mut()
            .ok_or_else(|| RenderError::Unavailable("no frame has been started".to_string()))
    }
}

impl RenderTarget for PixmapTarget {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        let c = self.clear_color;
        pixmap.fill(Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.pixmap = Some(pixmap);
        Ok(())
    }

    fn draw_background(&mut self, raster: &RasterImage) -> RenderResult<()> {
        let Some(background) = raster_to_pixmap(raster) else {
            log::debug!("Skipping empty background");
            return Ok(());
        };
        self.frame_mut()?.draw_pixmap(
            0,
            0,
            background.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_stroke(&mut self, stroke: &Stroke, smoothing: PathSmoothing) -> RenderResult<()> {
        let Some(first) = stroke.points().first().copied() else {
            return Ok(());
        };
        let style = stroke.style();
        let color = style.paint_color();

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;

        let pixmap = self.frame_mut()?;

        // A tap, or a drag that never left its anchor, shows up as a round dot.
        if stroke.points().iter().all(|p| *p == first) {
            let radius = (style.thickness / 2.0) as f32;
            if radius > 0.0 {
                if let Some(dot) = PathBuilder::from_circle(first.x as f32, first.y as f32, radius) {
                    pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            return Ok(());
        }

        let Some(path) = to_skia_path(&stroke.to_path(smoothing)) else {
            log::warn!("Stroke with {} points produced no path", stroke.len());
            return Ok(());
        };
        let skia_stroke = SkiaStroke {
            width: style.thickness as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..SkiaStroke::default()
        };
        pixmap.stroke_path(&path, &paint, &skia_stroke, Transform::identity(), None);
        Ok(())
    }
}

/// Premultiply a straight-alpha raster into a pixmap. None for zero-sized rasters.
fn raster_to_pixmap(raster: &RasterImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(raster.width(), raster.height())?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(raster.pixels().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

/// Convert a kurbo path to a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
