//! The drawing surface: background, committed strokes and the live stroke.

use crate::config::SurfaceConfig;
use crate::history::{HistoryStack, RedoPolicy};
use crate::raster::RasterImage;
use crate::render::{RenderResult, RenderTarget};
use crate::stroke::Stroke;
use crate::style::{SerializableColor, StrokeStyle, clamp_brush_alpha, clamp_brush_size};
use kurbo::Point;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("A stroke is already in progress; commit or cancel it first")]
    StrokeAlreadyOpen,
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Owns the background raster, the stroke history and the in-progress stroke.
///
/// Every mutation goes through this type. Operations that change what would
/// be rendered raise the needs-redraw flag; see [`Surface::take_needs_redraw`].
#[derive(Debug, Clone)]
pub struct Surface {
    config: SurfaceConfig,
    width: u32,
    height: u32,
    background: Option<RasterImage>,
    history: HistoryStack,
    /// Reused buffer for the live stroke. Empty whenever `drawing` is false.
    in_progress: Stroke,
    drawing: bool,
    /// Style applied to the next stroke.
    default_style: StrokeStyle,
    needs_redraw: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self::with_config(SurfaceConfig::default())
    }
}

impl Surface {
    /// Create a blank surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(SurfaceConfig::with_size(width, height))
    }

    /// Create a surface from `config`. The configured brush thickness goes
    /// through the same clamp as [`Surface::set_brush_size`].
    pub fn with_config(config: SurfaceConfig) -> Self {
        let density = config.effective_density();
        let mut default_style = config.default_style;
        default_style.thickness = clamp_brush_size(default_style.thickness / density) * density;
        Self {
            width: config.width,
            height: config.height,
            background: None,
            history: HistoryStack::with_policy(config.redo_policy),
            in_progress: Stroke::new(default_style),
            drawing: false,
            default_style,
            needs_redraw: true,
            config,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    // --- Stroke lifecycle ---

    /// Open a new stroke at `point` with `style`.
    ///
    /// Fails if a stroke is already open; callers pair every begin with a
    /// commit or cancel.
    pub fn begin_stroke(&mut self, point: Point, style: StrokeStyle) -> SurfaceResult<()> {
        if self.drawing {
            log::warn!("begin_stroke while a stroke is open");
            return Err(SurfaceError::StrokeAlreadyOpen);
        }
        self.in_progress.begin(point, style);
        self.drawing = true;
        self.needs_redraw = true;
        Ok(())
    }

    /// Append a point to the open stroke. Ignored when no stroke is open.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if !self.drawing {
            log::debug!("extend_stroke with no open stroke ignored");
            return false;
        }
        self.in_progress.extend(point);
        self.needs_redraw = true;
        true
    }

    /// Close the open stroke and append it to the history.
    ///
    /// Empty strokes are dropped. Either way the in-progress buffer is reset
    /// and picks up the current default style. Returns true if a stroke was
    /// committed.
    pub fn commit_stroke(&mut self) -> bool {
        let was_drawing = std::mem::replace(&mut self.drawing, false);
        let mut stroke = self.in_progress.take();
        self.in_progress.set_style(self.default_style);

        if let Some(tolerance) = self.config.simplify_tolerance {
            stroke.simplify(tolerance);
        }
        let committed = self.history.commit(stroke);
        if committed || was_drawing {
            self.needs_redraw = true;
        }
        committed
    }

    /// Throw away the open stroke without committing it.
    /// Returns true if there was an open stroke.
    pub fn cancel_stroke(&mut self) -> bool {
        if !self.drawing {
            return false;
        }
        self.in_progress.reset();
        self.in_progress.set_style(self.default_style);
        self.drawing = false;
        self.needs_redraw = true;
        log::debug!("Stroke cancelled");
        true
    }

    // --- Brush style ---

    /// Set the color of subsequent strokes.
    pub fn set_brush_color(&mut self, color: impl Into<SerializableColor>) {
        self.default_style.color = color.into();
        self.sync_idle_style();
    }

    /// Set the size of subsequent strokes. Clamped to `0..=200`, then scaled
    /// by the configured density to give the thickness in pixels.
    pub fn set_brush_size(&mut self, size: f64) {
        let clamped = clamp_brush_size(size);
        if clamped != size {
            log::debug!("Brush size {size} clamped to {clamped}");
        }
        self.default_style.thickness = clamped * self.config.effective_density();
        self.sync_idle_style();
    }

    /// Set the opacity of subsequent strokes. Clamped to `0..=255`.
    pub fn set_brush_alpha(&mut self, alpha: i32) {
        let clamped = clamp_brush_alpha(alpha);
        if i32::from(clamped) != alpha {
            log::debug!("Brush alpha {alpha} clamped to {clamped}");
        }
        self.default_style.opacity = clamped;
        self.sync_idle_style();
    }

    /// Paint over existing strokes with white, fully opaque.
    pub fn erase(&mut self) {
        self.erase_with(SerializableColor::white());
    }

    /// Paint over existing strokes with `background`, fully opaque.
    /// Nothing is removed; later strokes simply cover earlier pixels.
    pub fn erase_with(&mut self, background: impl Into<SerializableColor>) {
        self.default_style.opacity = u8::MAX;
        self.default_style.color = background.into();
        self.sync_idle_style();
    }

    pub fn brush_color(&self) -> SerializableColor {
        self.default_style.color
    }

    /// Brush thickness in pixels.
    pub fn brush_size(&self) -> f64 {
        self.default_style.thickness
    }

    pub fn brush_alpha(&self) -> u8 {
        self.default_style.opacity
    }

    /// Style the next stroke will be given.
    pub fn default_style(&self) -> StrokeStyle {
        self.default_style
    }

    fn sync_idle_style(&mut self) {
        if !self.drawing {
            self.in_progress.set_style(self.default_style);
        }
    }

    // --- History ---

    /// Undo the most recent stroke. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    /// Redo the most recently undone stroke. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    /// Remove every committed stroke from the board.
    pub fn clear_all(&mut self) {
        self.history.clear();
        self.needs_redraw = true;
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Committed strokes in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        self.history.committed()
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.history.policy()
    }

    pub fn set_redo_policy(&mut self, policy: RedoPolicy) {
        self.config.redo_policy = policy;
        self.history.set_policy(policy);
    }

    // --- Background and size ---

    /// Replace the background with a decoded image and clear the board.
    ///
    /// The surface takes on the image's native dimensions.
    pub fn import_background(&mut self, raster: RasterImage) {
        self.history.clear();
        (self.width, self.height) = raster.size();
        log::info!("Imported background {}x{}", self.width, self.height);
        self.background = Some(raster);
        self.needs_redraw = true;
    }

    pub fn background(&self) -> Option<&RasterImage> {
        self.background.as_ref()
    }

    /// Change the pixel size. History is untouched; a background larger than
    /// the new size is clipped when rendered.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            log::debug!("Surface resized to {width}x{height}");
            self.width = width;
            self.height = height;
            self.needs_redraw = true;
        }
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

    // --- Rendering ---

    /// The live stroke buffer. Empty unless a stroke is open.
    pub fn in_progress(&self) -> &Stroke {
        &self.in_progress
    }

    /// Whether a stroke is open.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Read and clear the needs-redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    /// Composite background, committed strokes and the live stroke onto `target`.
    ///
    /// Earlier strokes end up underneath later ones and the live stroke is
    /// always on top. A failing target aborts the call; surface state is
    /// never touched.
    pub fn render_to<T: RenderTarget + ?Sized>(&self, target: &mut T) -> RenderResult<()> {
        let smoothing = self.config.smoothing;

        target.begin(self.width, self.height)?;
        if let Some(background) = &self.background {
            target.draw_background(background)?;
        }
        for stroke in self.history.committed() {
            target.draw_stroke(stroke, smoothing)?;
        }
        if self.drawing && !self.in_progress.is_empty() {
            target.draw_stroke(&self.in_progress, smoothing)?;
        }
        target.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;
    use crate::stroke::PathSmoothing;

    /// Records what a render pass asked for.
    #[derive(Debug, Default)]
    struct RecordingTarget {
        ops: Vec<String>,
        fail_on_stroke: bool,
    }

    impl RenderTarget for RecordingTarget {
        fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
            self.ops.push(format!("begin {width}x{height}"));
            Ok(())
        }

        fn draw_background(&mut self, raster: &RasterImage) -> RenderResult<()> {
            self.ops
                .push(format!("background {}x{}", raster.width(), raster.height()));
            Ok(())
        }

        fn draw_stroke(&mut self, stroke: &Stroke, _smoothing: PathSmoothing) -> RenderResult<()> {
            if self.fail_on_stroke {
                return Err(RenderError::Failed("disk full".to_string()));
            }
            self.ops.push(format!(
                "stroke {} {}",
                stroke.points()[0].x,
                stroke.style().color.r
            ));
            Ok(())
        }

        fn finish(&mut self) -> RenderResult<()> {
            self.ops.push("finish".to_string());
            Ok(())
        }
    }

    fn draw_line(surface: &mut Surface, x: f64) {
        surface
            .begin_stroke(Point::new(x, 0.0), surface.default_style())
            .unwrap();
        surface.extend_stroke(Point::new(x, 10.0));
        assert!(surface.commit_stroke());
    }

    #[test]
    fn test_three_point_stroke_scenario() {
        let mut surface = Surface::new(100, 100);
        let style = surface.default_style();

        surface.begin_stroke(Point::new(10.0, 10.0), style).unwrap();
        surface.extend_stroke(Point::new(20.0, 10.0));
        surface.extend_stroke(Point::new(20.0, 20.0));
        assert!(surface.commit_stroke());

        assert_eq!(surface.strokes().len(), 1);
        let stroke = &surface.strokes()[0];
        assert_eq!(
            stroke.points(),
            &[
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(20.0, 20.0)
            ]
        );
        assert_eq!(*stroke.style(), style);
        assert!(surface.in_progress().is_empty());
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_begin_twice_fails() {
        let mut surface = Surface::new(10, 10);
        let style = surface.default_style();
        surface.begin_stroke(Point::new(1.0, 1.0), style).unwrap();
        assert_eq!(
            surface.begin_stroke(Point::new(2.0, 2.0), style),
            Err(SurfaceError::StrokeAlreadyOpen)
        );
        assert_eq!(surface.in_progress().points(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_commit_without_stroke_is_noop() {
        let mut surface = Surface::new(10, 10);
        assert!(!surface.commit_stroke());
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn test_extend_without_begin_is_ignored() {
        let mut surface = Surface::new(10, 10);
        assert!(!surface.extend_stroke(Point::new(5.0, 5.0)));
        assert!(surface.in_progress().is_empty());
        assert!(!surface.commit_stroke());
    }

    #[test]
    fn test_single_point_stroke_commits() {
        let mut surface = Surface::new(10, 10);
        surface
            .begin_stroke(Point::new(5.0, 5.0), surface.default_style())
            .unwrap();
        assert!(surface.commit_stroke());
        assert_eq!(surface.strokes()[0].len(), 1);
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut surface = Surface::new(10, 10);
        surface
            .begin_stroke(Point::new(5.0, 5.0), surface.default_style())
            .unwrap();
        surface.extend_stroke(Point::new(6.0, 6.0));
        assert!(surface.cancel_stroke());
        assert!(!surface.is_drawing());
        assert!(!surface.commit_stroke());
        assert!(surface.strokes().is_empty());
        assert!(!surface.cancel_stroke());
    }

    #[test]
    fn test_committed_style_is_not_changed_by_setters() {
        let mut surface = Surface::new(10, 10);
        draw_line(&mut surface, 1.0);
        surface.set_brush_color(SerializableColor::black());
        surface.set_brush_size(3.0);
        surface.set_brush_alpha(10);

        let committed = surface.strokes()[0].style();
        assert_eq!(committed.color, SerializableColor::red());
        assert_eq!(committed.thickness, 20.0);
        assert_eq!(committed.opacity, 255);
    }

    #[test]
    fn test_fresh_stroke_carries_current_default_style() {
        let mut surface = Surface::new(10, 10);
        let red = surface.default_style();
        surface.begin_stroke(Point::new(0.0, 0.0), red).unwrap();
        surface.set_brush_color(SerializableColor::black());
        surface.extend_stroke(Point::new(1.0, 1.0));

        // The open stroke keeps the style it began with.
        assert_eq!(surface.in_progress().style().color, SerializableColor::red());

        surface.commit_stroke();
        assert_eq!(surface.in_progress().style().color, SerializableColor::black());
        assert_eq!(surface.strokes()[0].style().color, SerializableColor::red());
    }

    #[test]
    fn test_brush_setters_clamp() {
        let mut surface = Surface::new(10, 10);
        surface.set_brush_size(-5.0);
        assert_eq!(surface.brush_size(), 0.0);
        surface.set_brush_size(500.0);
        assert_eq!(surface.brush_size(), 200.0);
        surface.set_brush_alpha(-1);
        assert_eq!(surface.brush_alpha(), 0);
        surface.set_brush_alpha(300);
        assert_eq!(surface.brush_alpha(), 255);
    }

    #[test]
    fn test_brush_size_applies_density() {
        let mut surface = Surface::with_config(SurfaceConfig::with_size(10, 10).with_density(2.0));
        surface.set_brush_size(30.0);
        assert_eq!(surface.brush_size(), 60.0);
        surface.set_brush_size(500.0);
        assert_eq!(surface.brush_size(), 400.0);
    }

    #[test]
    fn test_erase_paints_opaque_background_color() {
        let mut surface = Surface::new(10, 10);
        surface.set_brush_alpha(40);
        surface.erase();
        assert_eq!(surface.brush_color(), SerializableColor::white());
        assert_eq!(surface.brush_alpha(), 255);

        surface.erase_with(SerializableColor::new(1, 2, 3, 255));
        assert_eq!(surface.brush_color(), SerializableColor::new(1, 2, 3, 255));

        // Erasing adds strokes, it does not remove any.
        draw_line(&mut surface, 1.0);
        assert_eq!(surface.strokes().len(), 1);
    }

    #[test]
    fn test_commit_undo_commit_retains_redo() {
        let mut surface = Surface::new(10, 10);
        draw_line(&mut surface, 1.0); // A
        draw_line(&mut surface, 2.0); // B
        assert!(surface.undo());
        assert_eq!(surface.history().len(), 1);
        assert_eq!(surface.history().redo_buffer()[0].points()[0].x, 2.0);

        draw_line(&mut surface, 3.0); // C
        let xs: Vec<f64> = surface.strokes().iter().map(|s| s.points()[0].x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
        assert_eq!(surface.history().redo_len(), 1);
        assert_eq!(surface.history().redo_buffer()[0].points()[0].x, 2.0);
    }

    #[test]
    fn test_commit_undo_commit_with_discard_policy() {
        let mut surface = Surface::with_config(
            SurfaceConfig::with_size(10, 10).with_redo_policy(RedoPolicy::DiscardOnChange),
        );
        draw_line(&mut surface, 1.0);
        draw_line(&mut surface, 2.0);
        surface.undo();
        draw_line(&mut surface, 3.0);
        assert_eq!(surface.history().redo_len(), 0);
        assert!(!surface.redo());
    }

    #[test]
    fn test_clear_all_then_redo() {
        let mut surface = Surface::new(10, 10);
        draw_line(&mut surface, 1.0);
        draw_line(&mut surface, 2.0);
        surface.undo();
        surface.clear_all();
        assert!(surface.strokes().is_empty());

        assert!(surface.redo());
        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.strokes()[0].points()[0].x, 2.0);
    }

    #[test]
    fn test_undo_redo_on_empty_history() {
        let mut surface = Surface::new(10, 10);
        surface.take_needs_redraw();
        assert!(!surface.undo());
        assert!(!surface.redo());
        assert!(!surface.take_needs_redraw());
    }

    #[test]
    fn test_import_background_resets_committed_only() {
        let mut surface = Surface::new(10, 10);
        draw_line(&mut surface, 1.0);
        draw_line(&mut surface, 2.0);
        surface.undo();

        let raster = RasterImage::filled(40, 30, SerializableColor::white()).unwrap();
        surface.import_background(raster);
        assert_eq!(surface.size(), (40, 30));
        assert!(surface.strokes().is_empty());
        assert_eq!(surface.history().redo_len(), 1);
        assert!(surface.background().is_some());
    }

    #[test]
    fn test_redraw_flag() {
        let mut surface = Surface::new(10, 10);
        assert!(surface.take_needs_redraw());
        assert!(!surface.take_needs_redraw());

        surface.set_brush_color(SerializableColor::black());
        assert!(!surface.take_needs_redraw());

        draw_line(&mut surface, 1.0);
        assert!(surface.take_needs_redraw());
        surface.undo();
        assert!(surface.take_needs_redraw());
        surface.clear_all();
        assert!(surface.take_needs_redraw());
    }

    #[test]
    fn test_render_order() {
        let mut surface = Surface::new(10, 10);
        surface.import_background(RasterImage::filled(8, 6, SerializableColor::white()).unwrap());
        draw_line(&mut surface, 1.0);
        surface.set_brush_color(SerializableColor::new(7, 0, 0, 255));
        draw_line(&mut surface, 2.0);
        surface
            .begin_stroke(Point::new(3.0, 3.0), surface.default_style())
            .unwrap();

        let mut target = RecordingTarget::default();
        surface.render_to(&mut target).unwrap();
        assert_eq!(
            target.ops,
            vec![
                "begin 8x6",
                "background 8x6",
                "stroke 1 255",
                "stroke 2 7",
                "stroke 3 7",
                "finish",
            ]
        );
    }

    #[test]
    fn test_render_without_background() {
        let mut surface = Surface::new(5, 4);
        draw_line(&mut surface, 1.0);
        let mut target = RecordingTarget::default();
        surface.render_to(&mut target).unwrap();
        assert_eq!(target.ops, vec!["begin 5x4", "stroke 1 255", "finish"]);
    }

    #[test]
    fn test_render_failure_leaves_state_intact() {
        let mut surface = Surface::new(5, 4);
        draw_line(&mut surface, 1.0);
        surface
            .begin_stroke(Point::new(2.0, 2.0), surface.default_style())
            .unwrap();

        let mut target = RecordingTarget {
            fail_on_stroke: true,
            ..RecordingTarget::default()
        };
        assert!(surface.render_to(&mut target).is_err());
        assert_eq!(surface.strokes().len(), 1);
        assert!(surface.is_drawing());
        assert_eq!(surface.in_progress().len(), 1);
    }

    #[test]
    fn test_resize_keeps_history() {
        let mut surface = Surface::new(10, 10);
        draw_line(&mut surface, 1.0);
        surface.resize(20, 30);
        assert_eq!(surface.size(), (20, 30));
        assert_eq!(surface.strokes().len(), 1);
    }

    #[test]
    fn test_simplify_on_commit() {
        let mut surface =
            Surface::with_config(SurfaceConfig::with_size(10, 10).with_simplify_tolerance(Some(0.5)));
        surface
            .begin_stroke(Point::new(0.0, 0.0), surface.default_style())
            .unwrap();
        surface.extend_stroke(Point::new(1.0, 0.1));
        surface.extend_stroke(Point::new(2.0, 0.0));
        surface.commit_stroke();
        assert_eq!(surface.strokes()[0].len(), 2);
    }

    #[test]
    fn test_non_finite_simplify_tolerance_keeps_points() {
        let mut surface = Surface::with_config(
            SurfaceConfig::with_size(10, 10).with_simplify_tolerance(Some(f64::NAN)),
        );
        surface
            .begin_stroke(Point::new(0.0, 0.0), surface.default_style())
            .unwrap();
        surface.extend_stroke(Point::new(5.0, 9.0));
        surface.extend_stroke(Point::new(9.0, 0.0));
        surface.commit_stroke();
        assert_eq!(surface.strokes()[0].len(), 3);
    }

    #[test]
    fn test_config_default_style_is_clamped() {
        let mut config = SurfaceConfig::with_size(10, 10);
        config.default_style.thickness = 5000.0;
        let surface = Surface::with_config(config.clone());
        assert_eq!(surface.brush_size(), 200.0);
        assert_eq!(surface.in_progress().style().thickness, 200.0);

        config.default_style.thickness = -3.0;
        assert_eq!(Surface::with_config(config.clone()).brush_size(), 0.0);

        config.default_style.thickness = 300.0;
        let dense = Surface::with_config(config.with_density(2.0));
        assert_eq!(dense.brush_size(), 300.0);
    }
}
