//! Freehand strokes.

use crate::style::StrokeStyle;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// How consecutive stroke points are joined when building an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSmoothing {
    /// Straight segment to every point.
    #[default]
    Linear,
    /// Quadratic curves through the midpoints of consecutive points.
    Quadratic,
}

/// One continuous freehand gesture: an ordered point sequence with a fixed style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Style captured when the stroke began.
    style: StrokeStyle,
    /// Points in drawing order.
    points: Vec<Point>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(StrokeStyle::default())
    }
}

impl Stroke {
    /// Create an empty stroke carrying `style`.
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    /// Create a stroke from existing points.
    pub fn from_points(style: StrokeStyle, points: Vec<Point>) -> Self {
        Self { style, points }
    }

    /// Start over from a single anchor point with the given style.
    pub fn begin(&mut self, point: Point, style: StrokeStyle) {
        self.style = style;
        self.points.clear();
        self.points.push(point);
    }

    /// Append a point. On an empty stroke the point becomes the anchor.
    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Clear the points in place, keeping the style and the allocation.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Move the captured points out into a new stroke and reset this one.
    ///
    /// The returned stroke owns its own copy of the points; later changes to
    /// `self` never reach it.
    pub fn take(&mut self) -> Stroke {
        Stroke {
            style: self.style,
            points: self.points.drain(..).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Replace the style. Only meaningful for a stroke that is not yet committed.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Bounding box of the painted area, including half the line width.
    pub fn bounds(&self) -> Option<Rect> {
        let (first, rest) = self.points.split_first()?;
        let rect = rest
            .iter()
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p));
        let half = self.style.thickness / 2.0;
        Some(rect.inflate(half, half))
    }

    /// Build the outline path of the stroke.
    pub fn to_path(&self, smoothing: PathSmoothing) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(*first);
        match smoothing {
            PathSmoothing::Linear => {
                for point in rest {
                    path.line_to(*point);
                }
            }
            PathSmoothing::Quadratic => {
                let mut previous = *first;
                for point in rest {
                    path.quad_to(previous, previous.midpoint(*point));
                    previous = *point;
                }
                if !rest.is_empty() {
                    path.line_to(previous);
                }
            }
        }
        path
    }

    /// Simplify the point sequence by removing nearly collinear points.
    /// A non-finite tolerance leaves the stroke as is.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 || !tolerance.is_finite() {
            return;
        }

        // Ramer-Douglas-Peucker
        self.points = rdp_simplify(&self.points, tolerance);
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);

        // Junction point appears in both halves.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Distance from `point` to the line through `line_start` and `line_end`.
fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let line = line_end - line_start;
    let len_sq = line.hypot2();
    if len_sq < f64::EPSILON {
        return point.distance(line_start);
    }

    (point - line_start).cross(line).abs() / len_sq.sqrt()
}
