//! Word-compatible HTML output.
//!
//! Word opens an HTML file carrying the Office namespaces as a regular
//! document, keeping paragraph alignment, font sizes and page breaks. The
//! byte stream starts with a UTF-8 byte order mark so the encoding is picked
//! up without relying on the meta tag.

use super::DocumentSerializer;
use crate::error::SerializationError;
use crate::model::{Document, DocumentNode, Paragraph};

const BOM: &str = "\u{feff}";
const DEFAULT_TITLE: &str = "Converted Document";
const BODY_STYLE: &str = "body { font-family: Calibri, sans-serif; font-size: 11pt; line-height: 1.5; }\n\
                          p { margin: 0 0 10pt 0; }";
const PAGE_BREAK: &str = "<br clear=all style='page-break-before:always'>";
const EMPTY_PARAGRAPH: &str = "<p>&nbsp;</p>";

/// Serializer producing a `.doc` file Word opens as an editable document.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordHtmlSerializer;

impl WordHtmlSerializer {
    /// Create a new serializer.
    pub fn new() -> Self {
        Self
    }

    /// Render the HTML markup, without the byte order mark.
    pub fn render(&self, doc: &Document) -> String {
        let title = doc
            .metadata
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let mut output = String::new();
        output.push_str(
            "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
             xmlns:w='urn:schemas-microsoft-com:office:word' \
             xmlns='http://www.w3.org/TR/REC-html40'>\n",
        );
        output.push_str("<head>\n<meta charset='utf-8'>\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        output.push_str(&format!("<style>\n{}\n</style>\n", BODY_STYLE));
        output.push_str("</head>\n<body>\n");

        for node in &doc.nodes {
            match node {
                DocumentNode::Paragraph(p) => render_paragraph(&mut output, p),
                DocumentNode::PageBreak => output.push_str(PAGE_BREAK),
                DocumentNode::EmptyPage { .. } => output.push_str(EMPTY_PARAGRAPH),
            }
            output.push('\n');
        }

        output.push_str("</body>\n</html>\n");
        output
    }
}

impl DocumentSerializer for WordHtmlSerializer {
    fn mime_type(&self) -> &'static str {
        "application/msword"
    }

    fn file_extension(&self) -> &'static str {
        "doc"
    }

    fn serialize(&self, doc: &Document) -> Result<Vec<u8>, SerializationError> {
        if doc.nodes.is_empty() {
            return Err(SerializationError::new("word-html", "document has no content"));
        }
        let html = self.render(doc);
        let mut bytes = Vec::with_capacity(BOM.len() + html.len());
        bytes.extend_from_slice(BOM.as_bytes());
        bytes.extend_from_slice(html.as_bytes());
        Ok(bytes)
    }
}

fn render_paragraph(output: &mut String, paragraph: &Paragraph) {
    output.push_str(&format!(
        "<p style='text-align:{};font-size:{}pt'>{}</p>",
        paragraph.alignment.as_css(),
        format_points(paragraph.font_size_pt()),
        escape_html(&paragraph.text)
    ));
}

/// Point size rounded to two decimals, without trailing zeros.
fn format_points(points: f32) -> String {
    let rounded = (points * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Escape text for HTML element content and single-quoted attributes.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
