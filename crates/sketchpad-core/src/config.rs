//! Surface configuration.

use crate::history::RedoPolicy;
use crate::stroke::PathSmoothing;
use crate::style::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Surface width used when none is configured.
pub const DEFAULT_WIDTH: u32 = 1080;
/// Surface height used when none is configured.
pub const DEFAULT_HEIGHT: u32 = 1920;

/// Settings for a drawing surface. Every field has a default, so a partial
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width in pixels (until a background is imported).
    pub width: u32,
    /// Surface height in pixels (until a background is imported).
    pub height: u32,
    /// Redo buffer behavior on commit/clear.
    pub redo_policy: RedoPolicy,
    /// Pixels per logical brush size unit.
    pub density: f64,
    /// How stroke points are joined when rendered.
    pub smoothing: PathSmoothing,
    /// Simplify strokes on commit with this tolerance, in pixels.
    pub simplify_tolerance: Option<f64>,
    /// Brush style before any setter is called.
    pub default_style: StrokeStyle,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            redo_policy: RedoPolicy::default(),
            density: 1.0,
            smoothing: PathSmoothing::default(),
            simplify_tolerance: None,
            default_style: StrokeStyle::default(),
        }
    }
}

impl SurfaceConfig {
    /// Configuration for a surface of the given size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the redo policy.
    pub fn with_redo_policy(mut self, policy: RedoPolicy) -> Self {
        self.redo_policy = policy;
        self
    }

    /// Set the display density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the path smoothing mode.
    pub fn with_smoothing(mut self, smoothing: PathSmoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Enable simplification on commit.
    pub fn with_simplify_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    /// A density that can safely scale brush sizes.
    pub(crate) fn effective_density(&self) -> f64 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        }
    }
}
