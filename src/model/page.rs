//! Page-level extraction output.

use super::TextRun;
use serde::{Deserialize, Serialize};

/// The text runs of a single page together with its dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRuns {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Runs in extraction order
    pub runs: Vec<TextRun>,
}

impl PageRuns {
    /// Create a new page with the given dimensions and no runs.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            runs: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// A Letter-sized page without runs, standing in for a page whose
    /// extraction failed.
    pub fn empty(number: u32) -> Self {
        Self::letter(number)
    }

    /// Set the runs of the page.
    pub fn with_runs(mut self, runs: Vec<TextRun>) -> Self {
        self.runs = runs;
        self
    }

    /// Add a run to the page.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Check if the page has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl Default for PageRuns {
    fn default() -> Self {
        Self::letter(1)
    }
}
