//! Alignment and font size inference from line geometry.

use super::{LayoutOptions, Line};
use crate::model::Alignment;

/// Presentation inferred for a single line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Left or centered
    pub alignment: Alignment,
    /// Output font size (half-points)
    pub font_size: f32,
}

/// Infer alignment and font size for a non-empty line.
pub fn infer_style(line: &Line, page_width: f32, options: &LayoutOptions) -> LineStyle {
    debug_assert!(!line.is_empty(), "style inference on an empty line");

    LineStyle {
        alignment: infer_alignment(line, page_width, options.center_threshold),
        font_size: options.font_scale.apply(mean_font_size(line)),
    }
}

/// A line is centered when its midpoint lies within
/// `threshold * page_width` of the page midpoint.
///
/// Right alignment and justification are never inferred: without column
/// widths a short centered line and a right-aligned one look alike.
pub fn infer_alignment(line: &Line, page_width: f32, threshold: f32) -> Alignment {
    if !(page_width.is_finite() && page_width > 0.0) {
        return Alignment::Left;
    }
    let page_center = page_width / 2.0;
    if (line.center_x() - page_center).abs() < threshold * page_width {
        Alignment::Center
    } else {
        Alignment::Left
    }
}

/// Unweighted mean of the run font sizes.
fn mean_font_size(line: &Line) -> f32 {
    if line.runs.is_empty() {
        return 0.0;
    }
    let total: f32 = line.runs.iter().map(|r| r.font_size).sum();
    total / line.runs.len() as f32
}
