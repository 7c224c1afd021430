//! Serializers from the document model to output bytes.

mod json;
mod word_html;

pub use json::{JsonFormat, JsonSerializer};
pub use word_html::WordHtmlSerializer;

use crate::error::SerializationError;
use crate::model::Document;

/// Turns a [`Document`] into the bytes of an output file.
pub trait DocumentSerializer {
    /// MIME type of the produced bytes.
    fn mime_type(&self) -> &'static str;

    /// File extension, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Serialize a document.
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>, SerializationError>;
}
