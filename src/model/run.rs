//! Positioned text runs as produced by the extraction layer.

use serde::{Deserialize, Serialize};

/// One atomic positioned string extracted from a PDF page.
///
/// Coordinates are in page units with the origin at the bottom-left of the
/// page, so `y` grows upward. `font_size` is derived from the text matrix and
/// is only an approximation of the real point size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// Baseline origin X
    pub x: f32,
    /// Baseline origin Y
    pub y: f32,
    /// Scale-derived font size
    pub font_size: f32,
    /// Approximate advance width, when the extractor could estimate it
    pub width: Option<f32>,
}

impl TextRun {
    /// Create a run without a width hint.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            width: None,
        }
    }

    /// Create a run from a text rendering transform `[a, b, c, d, e, f]`.
    ///
    /// The origin is the translation part and the font size is the length of
    /// the vertical basis vector.
    pub fn from_transform(text: impl Into<String>, transform: [f32; 6], width: Option<f32>) -> Self {
        let [_, _, c, d, e, f] = transform;
        Self {
            text: text.into(),
            x: e,
            y: f,
            font_size: c.hypot(d),
            width,
        }
    }

    /// Set the advance width hint.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Right edge of the run (origin plus width hint, 0 if absent).
    pub fn end_x(&self) -> f32 {
        self.x + self.width.unwrap_or(0.0)
    }

    /// Whether both origin coordinates are finite numbers.
    pub fn is_positioned(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check if this run carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transform() {
        let run = TextRun::from_transform("Hi", [12.0, 0.0, 0.0, 12.0, 72.0, 700.0], Some(14.0));
        assert_eq!(run.x, 72.0);
        assert_eq!(run.y, 700.0);
        assert!((run.font_size - 12.0).abs() < 1e-6);
        assert_eq!(run.end_x(), 86.0);
    }

    #[test]
    fn test_end_x_without_width() {
        let run = TextRun::new("x", 10.0, 0.0, 12.0);
        assert_eq!(run.end_x(), 10.0);
    }

    #[test]
    fn test_is_positioned() {
        assert!(TextRun::new("a", 0.0, 0.0, 12.0).is_positioned());
        assert!(!TextRun::new("a", 0.0, f32::NAN, 12.0).is_positioned());
        assert!(!TextRun::new("a", f32::INFINITY, 0.0, 12.0).is_positioned());
    }
}
