//! Conversion pipeline: provider pages in, assembled [`Document`] out.
//!
//! Pages are always pulled from the provider on the calling thread. With
//! [`PipelineOptions::parallel`] set, the layout pass of the extracted pages
//! runs on the rayon pool; results are collected by page index and folded
//! into the assembler in page order, so the output never depends on
//! scheduling.

mod options;

pub use options::{ErrorMode, PipelineOptions};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::assemble::DocumentAssembler;
use crate::error::{Error, Result};
use crate::layout::layout_page;
use crate::model::{Document, PageRuns, Paragraph};
use crate::provider::TextRunProvider;

/// Shared flag for aborting a running conversion.
///
/// Cloning yields a handle to the same flag. A cancelled conversion returns
/// [`Error::Cancelled`] and no partial document.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Drives a [`TextRunProvider`] through layout and assembly.
#[derive(Debug, Clone, Default)]
pub struct ConversionPipeline {
    options: PipelineOptions,
}

impl ConversionPipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Lay out one page into paragraphs, one per visual line.
    pub fn process_page(&self, page: &PageRuns) -> Vec<Paragraph> {
        layout_page(page, &self.options.layout)
            .into_iter()
            .map(Paragraph::from)
            .collect()
    }

    /// Convert every page of the provider.
    pub fn run<P>(&self, provider: &P) -> Result<Document>
    where
        P: TextRunProvider + ?Sized,
    {
        self.run_with(provider, &|_, _| {}, None)
    }

    /// Convert every page, reporting `(page_number, page_count)` after each
    /// page completes and honoring an optional cancellation token.
    ///
    /// In parallel mode every page is extracted on the calling thread before
    /// layout starts, so progress covers layout only and no page is reported
    /// until extraction has finished. Pages may complete, and so be reported,
    /// out of order. Sequential mode reports each page after both steps.
    pub fn run_with<P>(
        &self,
        provider: &P,
        progress: &(dyn Fn(u32, u32) + Sync),
        cancel: Option<&CancellationToken>,
    ) -> Result<Document>
    where
        P: TextRunProvider + ?Sized,
    {
        self.options.validate()?;

        let page_count = provider.page_count();
        if page_count == 0 {
            return Err(Error::EmptyDocument);
        }
        let is_cancelled = || cancel.is_some_and(CancellationToken::is_cancelled);

        let mut assembler = DocumentAssembler::new();
        if self.options.parallel {
            let mut pages = Vec::with_capacity(page_count as usize);
            for number in 1..=page_count {
                if is_cancelled() {
                    return Err(Error::Cancelled);
                }
                pages.push(self.fetch_page(provider, number)?);
            }

            let laid_out: Vec<Vec<Paragraph>> = pages
                .par_iter()
                .map(|page| {
                    if is_cancelled() {
                        return Vec::new();
                    }
                    let paragraphs = self.process_page(page);
                    progress(page.number, page_count);
                    paragraphs
                })
                .collect();

            for (page, paragraphs) in pages.iter().zip(laid_out) {
                assembler.push_page(page.number, paragraphs);
            }
        } else {
            for number in 1..=page_count {
                if is_cancelled() {
                    return Err(Error::Cancelled);
                }
                let page = self.fetch_page(provider, number)?;
                assembler.push_page(number, self.process_page(&page));
                progress(number, page_count);
            }
        }

        if is_cancelled() {
            return Err(Error::Cancelled);
        }

        let document = assembler.finish(provider.metadata());
        log::debug!(
            "Assembled {} paragraphs across {} pages",
            document.paragraph_count(),
            document.page_count()
        );
        Ok(document)
    }

    /// Pull one page from the provider, applying the error mode.
    ///
    /// The returned page always carries `number`, whatever the provider put
    /// in it.
    fn fetch_page<P>(&self, provider: &P, number: u32) -> Result<PageRuns>
    where
        P: TextRunProvider + ?Sized,
    {
        match provider.page(number) {
            Ok(mut page) => {
                page.number = number;
                Ok(page)
            }
            Err(e) => match self.options.error_mode {
                ErrorMode::Strict => Err(Error::Extraction(e)),
                ErrorMode::Lenient => {
                    log::warn!("Treating page {} as empty: {}", number, e.cause);
                    Ok(PageRuns::empty(number))
                }
            },
        }
    }
}
