//! # pdf2word
//!
//! Reconstruct editable Word documents from the positioned text of digital
//! PDFs.
//!
//! A PDF page is a bag of text runs placed at absolute coordinates. This
//! library clusters runs into visual lines, puts the lines in reading order,
//! infers alignment and font size for each, and assembles a document of
//! paragraphs and page breaks that Word opens as an editable `.doc`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2word::{convert, output_file_name};
//!
//! fn main() -> pdf2word::Result<()> {
//!     let pdf = std::fs::read("report.pdf")?;
//!     let doc = convert(&pdf)?;
//!     std::fs::write(output_file_name("report.pdf"), doc)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line reconstruction**: baseline clustering with a configurable tolerance
//! - **Reading order**: top-to-bottom lines, left-to-right runs
//! - **Style inference**: centered lines and scaled font sizes
//! - **Page structure**: exactly one page break between consecutive pages
//! - **Parallel processing**: uses Rayon for the layout of multi-page documents

pub mod assemble;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;

// Re-export commonly used types
pub use assemble::{assemble, DocumentAssembler};
pub use detect::{is_pdf, sniff_pdf, PdfHeader};
pub use error::{Error, ExtractionError, Result, SerializationError};
pub use layout::{FontScale, LayoutOptions};
pub use model::{Alignment, Document, DocumentNode, Metadata, PageRuns, Paragraph, TextRun};
pub use pipeline::{CancellationToken, ConversionPipeline, ErrorMode, PipelineOptions};
pub use provider::{LopdfProvider, TextRunProvider};
pub use render::{DocumentSerializer, JsonFormat, JsonSerializer, WordHtmlSerializer};

use std::path::Path;

/// Convert PDF bytes to a Word-compatible `.doc` file.
///
/// # Example
///
/// ```no_run
/// let pdf = std::fs::read("document.pdf").unwrap();
/// let doc = pdf2word::convert(&pdf).unwrap();
/// std::fs::write("document.doc", doc).unwrap();
/// ```
pub fn convert(pdf_bytes: &[u8]) -> Result<Vec<u8>> {
    Converter::new().convert_bytes(pdf_bytes).map(|r| r.bytes)
}

/// Convert PDF bytes, reporting `(page_number, page_count)` as pages finish.
///
/// # Example
///
/// ```no_run
/// let pdf = std::fs::read("document.pdf").unwrap();
/// let doc = pdf2word::convert_with_progress(&pdf, &|page, total| {
///     eprintln!("{}/{}", page, total);
/// })
/// .unwrap();
/// ```
pub fn convert_with_progress(
    pdf_bytes: &[u8],
    progress: &(dyn Fn(u32, u32) + Sync),
) -> Result<Vec<u8>> {
    Converter::new()
        .convert_bytes_with_progress(pdf_bytes, progress)
        .map(|r| r.bytes)
}

/// Reconstruct the document model without serializing it.
///
/// # Example
///
/// ```no_run
/// let pdf = std::fs::read("document.pdf").unwrap();
/// let doc = pdf2word::extract_document(&pdf).unwrap();
/// println!("{}", doc.plain_text());
/// ```
pub fn extract_document(pdf_bytes: &[u8]) -> Result<Document> {
    Converter::new().extract_bytes(pdf_bytes)
}

/// Convert a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdf2word::{convert_file, output_file_name};
///
/// let result = convert_file("report.pdf")?;
/// result.write_to(output_file_name("report.pdf"))?;
/// # Ok::<(), pdf2word::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    Converter::new().convert_file(path)
}

/// Derive the output file name for a converted PDF.
///
/// A trailing `.pdf` (any case) is replaced by `.doc`; any other name gets
/// `.doc` appended.
///
/// ```
/// assert_eq!(pdf2word::output_file_name("report.pdf"), "report.doc");
/// assert_eq!(pdf2word::output_file_name("SCAN.PDF"), "SCAN.doc");
/// assert_eq!(pdf2word::output_file_name("notes"), "notes.doc");
/// ```
pub fn output_file_name(name: &str) -> String {
    const PDF_EXT: &str = ".pdf";
    let split = name.len().checked_sub(PDF_EXT.len());
    match split {
        Some(idx)
            if name.is_char_boundary(idx) && name[idx..].eq_ignore_ascii_case(PDF_EXT) =>
        {
            format!("{}.doc", &name[..idx])
        }
        _ => format!("{}.doc", name),
    }
}

/// Output format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Word-compatible HTML (`.doc`)
    #[default]
    WordHtml,
    /// The document model as JSON
    Json(JsonFormat),
}

impl OutputFormat {
    fn serializer(&self) -> Box<dyn DocumentSerializer> {
        match self {
            OutputFormat::WordHtml => Box::new(WordHtmlSerializer::new()),
            OutputFormat::Json(format) => Box::new(JsonSerializer::new(*format)),
        }
    }
}

/// Builder for converting PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdf2word::{Converter, LayoutOptions};
///
/// let result = Converter::new()
///     .strict()
///     .sequential()
///     .with_layout(LayoutOptions::new().with_y_tolerance(3.0))
///     .convert_file("document.pdf")?;
/// println!("{} ({} bytes)", result.mime_type, result.bytes.len());
/// # Ok::<(), pdf2word::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: PipelineOptions,
    format: OutputFormat,
    cancel: Option<CancellationToken>,
}

impl Converter {
    /// Create a new converter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Fail on the first page that cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.options = self.options.with_layout(layout);
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Abort the conversion when the token is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Convert PDF bytes.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ConvertResult> {
        self.convert_bytes_with_progress(data, &|_, _| {})
    }

    /// Convert PDF bytes with a progress callback.
    pub fn convert_bytes_with_progress(
        &self,
        data: &[u8],
        progress: &(dyn Fn(u32, u32) + Sync),
    ) -> Result<ConvertResult> {
        let provider = LopdfProvider::from_bytes(data)?;
        self.convert_provider_with_progress(&provider, progress)
    }

    /// Convert a PDF file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        let data = std::fs::read(path)?;
        self.convert_bytes(&data)
    }

    /// Convert pages from any provider.
    pub fn convert_provider<P>(&self, provider: &P) -> Result<ConvertResult>
    where
        P: TextRunProvider + ?Sized,
    {
        self.convert_provider_with_progress(provider, &|_, _| {})
    }

    /// Convert pages from any provider with a progress callback.
    pub fn convert_provider_with_progress<P>(
        &self,
        provider: &P,
        progress: &(dyn Fn(u32, u32) + Sync),
    ) -> Result<ConvertResult>
    where
        P: TextRunProvider + ?Sized,
    {
        let document = self.run(provider, progress)?;
        let serializer = self.format.serializer();
        let bytes = serializer.serialize(&document)?;
        Ok(ConvertResult {
            bytes,
            document,
            mime_type: serializer.mime_type(),
            extension: serializer.file_extension(),
        })
    }

    /// Reconstruct the document model from PDF bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Document> {
        let provider = LopdfProvider::from_bytes(data)?;
        self.run(&provider, &|_, _| {})
    }

    fn run<P>(&self, provider: &P, progress: &(dyn Fn(u32, u32) + Sync)) -> Result<Document>
    where
        P: TextRunProvider + ?Sized,
    {
        ConversionPipeline::new(self.options.clone()).run_with(
            provider,
            progress,
            self.cancel.as_ref(),
        )
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Serialized output
    pub bytes: Vec<u8>,
    /// The reconstructed document
    pub document: Document,
    /// MIME type of `bytes`
    pub mime_type: &'static str,
    /// File extension for `bytes`, without the dot
    pub extension: &'static str,
}

impl ConvertResult {
    /// Write the serialized output to a file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }

    /// Plain text preview of the document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }
}
