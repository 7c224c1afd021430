//! Lines of text runs sharing a vertical band.

use crate::model::{Alignment, TextRun};

/// A cluster of runs judged to share one baseline band.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Anchor Y: the baseline of the first run seen for this line
    pub y: f32,
    /// The runs in this line, sorted by X once ordered
    pub runs: Vec<TextRun>,
    /// Creation order within the page, used as the final ordering tie-break
    pub seq: usize,
}

impl Line {
    /// Start a new line anchored at the run's baseline.
    pub fn new(run: TextRun, seq: usize) -> Self {
        Self {
            y: run.y,
            runs: vec![run],
            seq,
        }
    }

    /// Leftmost X (origin of the first run).
    pub fn start_x(&self) -> f32 {
        self.runs.first().map(|r| r.x).unwrap_or(0.0)
    }

    /// Right edge: origin of the last run plus its width hint.
    pub fn end_x(&self) -> f32 {
        self.runs.last().map(TextRun::end_x).unwrap_or(0.0)
    }

    /// Horizontal center of the line.
    pub fn center_x(&self) -> f32 {
        (self.start_x() + self.end_x()) / 2.0
    }

    /// Check if the line has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// A line annotated with its joined text and inferred presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    /// Run texts joined with inferred spacing
    pub text: String,
    /// Inferred alignment
    pub alignment: Alignment,
    /// Output font size (half-points)
    pub font_size: f32,
}
