//! JSON serialization of the document model.

use super::DocumentSerializer;
use crate::error::SerializationError;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serializer producing the document model as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    format: JsonFormat,
}

impl JsonSerializer {
    /// Create a serializer with the given format.
    pub fn new(format: JsonFormat) -> Self {
        Self { format }
    }

    /// Serialize to a string.
    pub fn render(&self, doc: &Document) -> Result<String, SerializationError> {
        let result = match self.format {
            JsonFormat::Pretty => serde_json::to_string_pretty(doc),
            JsonFormat::Compact => serde_json::to_string(doc),
        };
        result.map_err(|e| SerializationError::new("json", e.to_string()))
    }
}

impl DocumentSerializer for JsonSerializer {
    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<Vec<u8>, SerializationError> {
        self.render(doc).map(String::into_bytes)
    }
}
