//! Document-level types.

use super::Paragraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reconstructed document: paragraphs and page breaks in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Nodes in reading order
    pub nodes: Vec<DocumentNode>,

    /// Document metadata (page count, title, etc.)
    pub metadata: Metadata,
}

impl Document {
    /// Create a document from nodes and metadata.
    pub fn new(nodes: Vec<DocumentNode>, metadata: Metadata) -> Self {
        Self { nodes, metadata }
    }

    /// Number of source pages.
    pub fn page_count(&self) -> u32 {
        self.metadata.page_count
    }

    /// Iterate over the paragraphs in reading order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.nodes.iter().filter_map(|node| match node {
            DocumentNode::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Number of paragraph nodes.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Number of page break nodes.
    pub fn page_break_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, DocumentNode::PageBreak))
            .count()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraph_count() == 0
    }

    /// Plain text preview: one line per paragraph, pages separated by a
    /// blank line.
    pub fn plain_text(&self) -> String {
        let mut pages: Vec<Vec<&str>> = vec![Vec::new()];
        for node in &self.nodes {
            match node {
                DocumentNode::Paragraph(p) => {
                    if let Some(page) = pages.last_mut() {
                        page.push(&p.text);
                    }
                }
                DocumentNode::PageBreak => pages.push(Vec::new()),
                DocumentNode::EmptyPage { .. } => {}
            }
        }
        pages
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Verify the structural invariants of the node sequence.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.metadata.page_count == 0 {
            return Err(InvariantViolation::NoPages);
        }
        if matches!(self.nodes.first(), Some(DocumentNode::PageBreak)) {
            return Err(InvariantViolation::LeadingPageBreak);
        }
        if matches!(self.nodes.last(), Some(DocumentNode::PageBreak)) {
            return Err(InvariantViolation::TrailingPageBreak);
        }
        if self
            .nodes
            .windows(2)
            .any(|w| matches!(w, [DocumentNode::PageBreak, DocumentNode::PageBreak]))
        {
            return Err(InvariantViolation::AdjacentPageBreaks);
        }
        let expected = self.metadata.page_count as usize - 1;
        let breaks = self.page_break_count();
        if breaks != expected {
            return Err(InvariantViolation::PageBreakCount { expected, breaks });
        }
        Ok(())
    }
}

/// A node of the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentNode {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A page break between two source pages
    PageBreak,

    /// Marker for a source page that produced no paragraphs
    EmptyPage {
        /// Page number (1-indexed)
        page: u32,
    },
}

impl DocumentNode {
    /// Check if this node is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, DocumentNode::Paragraph(_))
    }

    /// Check if this node is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, DocumentNode::PageBreak)
    }
}

/// A broken structural invariant of a [`Document`].
///
/// These are programming errors in the assembler and are never surfaced to
/// users of the conversion API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("document has no pages")]
    NoPages,
    #[error("document starts with a page break")]
    LeadingPageBreak,
    #[error("document ends with a page break")]
    TrailingPageBreak,
    #[error("two page breaks in succession")]
    AdjacentPageBreaks,
    #[error("expected {expected} page breaks, found {breaks}")]
    PageBreakCount { expected: usize, breaks: usize },
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Total number of source pages
    pub page_count: u32,

    /// Document title from the PDF info dictionary
    pub title: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}
