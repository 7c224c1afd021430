//! Layout reconstruction options.

use crate::error::{Error, Result};

/// Tunables for line clustering and style inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Maximum baseline distance for two runs to share a line (page units)
    pub y_tolerance: f32,

    /// Maximum distance between line center and page center, as a fraction
    /// of the page width, for a line to count as centered
    pub center_threshold: f32,

    /// Mapping from source font size to output size units
    pub font_scale: FontScale,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line clustering tolerance.
    pub fn with_y_tolerance(mut self, tolerance: f32) -> Self {
        self.y_tolerance = tolerance;
        self
    }

    /// Set the centering threshold.
    pub fn with_center_threshold(mut self, threshold: f32) -> Self {
        self.center_threshold = threshold;
        self
    }

    /// Set the font size mapping.
    pub fn with_font_scale(mut self, scale: FontScale) -> Self {
        self.font_scale = scale;
        self
    }

    /// Reject values the layout engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.y_tolerance.is_finite() && self.y_tolerance > 0.0) {
            return Err(Error::InvalidOption(format!(
                "y tolerance must be positive, got {}",
                self.y_tolerance
            )));
        }
        if !(self.center_threshold > 0.0 && self.center_threshold <= 0.5) {
            return Err(Error::InvalidOption(format!(
                "center threshold must be in (0, 0.5], got {}",
                self.center_threshold
            )));
        }
        if !(self.font_scale.factor.is_finite() && self.font_scale.factor > 0.0) {
            return Err(Error::InvalidOption(format!(
                "font scale factor must be positive, got {}",
                self.font_scale.factor
            )));
        }
        if !(self.font_scale.min_size.is_finite() && self.font_scale.min_size >= 0.0) {
            return Err(Error::InvalidOption(format!(
                "minimum font size must be non-negative, got {}",
                self.font_scale.min_size
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            y_tolerance: 5.0,
            center_threshold: 0.1,
            font_scale: FontScale::default(),
        }
    }
}

/// Heuristic mapping from extracted font size to output size units.
///
/// The default multiplies by 1.5 and floors at 16 half-points (8pt). This is
/// an empirical correction, not a physical unit conversion; callers that
/// know the relationship between source and target units should use
/// [`FontScale::calibrated`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    /// Multiplier applied to the mean run font size
    pub factor: f32,
    /// Smallest size ever emitted
    pub min_size: f32,
}

impl FontScale {
    /// A custom factor with the default floor.
    pub fn calibrated(factor: f32) -> Self {
        Self {
            factor,
            ..Self::default()
        }
    }

    /// Set the minimum output size.
    pub fn with_min_size(mut self, min_size: f32) -> Self {
        self.min_size = min_size;
        self
    }

    /// Map a source size to an output size.
    pub fn apply(&self, size: f32) -> f32 {
        let scaled = size * self.factor;
        if scaled.is_finite() {
            scaled.max(self.min_size)
        } else {
            self.min_size
        }
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            factor: 1.5,
            min_size: 16.0,
        }
    }
}
