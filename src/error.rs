//! Error types for pdf2word.

use std::io;
use thiserror::Error;

/// Result type alias for pdf2word operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text runs could not be extracted from a page.
    #[error("Text extraction failed on {0}")]
    Extraction(#[from] ExtractionError),

    /// The document has no pages to convert.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The output serializer failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// A configuration value is outside its valid range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The conversion was cancelled before the document was complete.
    #[error("Conversion cancelled")]
    Cancelled,
}

/// A page-level extraction failure reported by a text-run provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("page {page}: {cause}")]
pub struct ExtractionError {
    /// Page number (1-indexed)
    pub page: u32,
    /// Underlying cause
    pub cause: String,
}

impl ExtractionError {
    /// Create a new extraction error for a page.
    pub fn new(page: u32, cause: impl Into<String>) -> Self {
        Self {
            page,
            cause: cause.into(),
        }
    }
}

/// Failure reported by a document serializer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{format}: {message}")]
pub struct SerializationError {
    /// Output format name
    pub format: &'static str,
    /// Description of the failure
    pub message: String,
}

impl SerializationError {
    /// Create a new serialization error.
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
