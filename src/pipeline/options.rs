//! Pipeline options and configuration.

use crate::error::Result;
use crate::layout::LayoutOptions;

/// Options for running a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Layout reconstruction tunables
    pub layout: LayoutOptions,

    /// Error handling mode for page extraction failures
    pub error_mode: ErrorMode,

    /// Whether to lay out pages in parallel
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort on the first page that fails to extract.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Replace pages that fail to extract with empty pages.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validate the nested layout options.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            error_mode: ErrorMode::Lenient,
            parallel: true,
        }
    }
}

/// Error handling mode for page extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole conversion
    Strict,
    /// Treat the page as empty and continue
    #[default]
    Lenient,
}
