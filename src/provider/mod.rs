//! Text-run providers.
//!
//! A provider turns a source document into per-page lists of positioned
//! [`TextRun`](crate::model::TextRun)s. The layout engine only sees the
//! [`TextRunProvider`] trait; [`LopdfProvider`] is the concrete PDF backend.

mod backend;

pub use backend::{decode_text_simple, LopdfProvider};

use crate::error::ExtractionError;
use crate::model::{Metadata, PageRuns};

/// Source of positioned text runs, one page at a time.
///
/// Extraction is always driven from the calling thread; only the layout of
/// already extracted pages may run in parallel.
pub trait TextRunProvider {
    /// Number of pages in the source document.
    fn page_count(&self) -> u32;

    /// Extract the runs of a page (1-indexed).
    fn page(&self, number: u32) -> Result<PageRuns, ExtractionError>;

    /// Document-level metadata. `page_count` is filled in by the pipeline.
    fn metadata(&self) -> Metadata {
        Metadata::default()
    }
}

/// Already materialized pages, in page order.
impl TextRunProvider for Vec<PageRuns> {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn page(&self, number: u32) -> Result<PageRuns, ExtractionError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.get(idx as usize))
            .cloned()
            .ok_or_else(|| {
                ExtractionError::new(
                    number,
                    format!("out of range (document has {} pages)", self.len()),
                )
            })
    }
}
