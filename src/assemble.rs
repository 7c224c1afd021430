//! Folding per-page paragraphs into the document node sequence.

use crate::error::{Error, Result};
use crate::layout::{layout_page, LayoutOptions};
use crate::model::{Document, DocumentNode, Metadata, PageRuns, Paragraph};

/// Builds a [`Document`] one page at a time, in page order.
///
/// Exactly one [`DocumentNode::PageBreak`] separates consecutive pages. A
/// page without paragraphs contributes a [`DocumentNode::EmptyPage`] marker
/// so the breaks around it stay separated.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    nodes: Vec<DocumentNode>,
    pages: u32,
}

impl DocumentAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the paragraphs of the next page.
    pub fn push_page(&mut self, number: u32, paragraphs: Vec<Paragraph>) {
        if self.pages > 0 {
            self.nodes.push(DocumentNode::PageBreak);
        }
        if paragraphs.is_empty() {
            self.nodes.push(DocumentNode::EmptyPage { page: number });
        } else {
            self.nodes
                .extend(paragraphs.into_iter().map(DocumentNode::Paragraph));
        }
        self.pages += 1;
    }

    /// Number of pages pushed so far.
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    /// Finish the document. `metadata.page_count` is overwritten with the
    /// number of pages pushed.
    pub fn finish(self, mut metadata: Metadata) -> Document {
        metadata.page_count = self.pages;
        let document = Document::new(self.nodes, metadata);
        debug_assert!(
            document.check_invariants().is_ok(),
            "assembled document violates invariants: {:?}",
            document.check_invariants()
        );
        document
    }
}

/// Lay out and assemble already materialized pages, sequentially.
pub fn assemble(pages: Vec<PageRuns>, options: &LayoutOptions) -> Result<Document> {
    options.validate()?;
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }
    let mut assembler = DocumentAssembler::new();
    for page in &pages {
        let paragraphs = layout_page(page, options)
            .into_iter()
            .map(Paragraph::from)
            .collect();
        assembler.push_page(page.number, paragraphs);
    }
    Ok(assembler.finish(Metadata::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    fn para(text: &str) -> Paragraph {
        Paragraph::new(text, 18.0)
    }

    #[test]
    fn test_single_page_has_no_break() {
        let mut assembler = DocumentAssembler::new();
        assembler.push_page(1, vec![para("a"), para("b")]);
        let doc = assembler.finish(Metadata::default());
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_break_count(), 0);
    }

    #[test]
    fn test_empty_middle_page_keeps_breaks_apart() {
        let mut assembler = DocumentAssembler::new();
        assembler.push_page(1, vec![para("a"), para("b")]);
        assembler.push_page(2, vec![]);
        assembler.push_page(3, vec![para("c")]);
        let doc = assembler.finish(Metadata::default());

        assert_eq!(
            doc.nodes,
            vec![
                DocumentNode::Paragraph(para("a")),
                DocumentNode::Paragraph(para("b")),
                DocumentNode::PageBreak,
                DocumentNode::EmptyPage { page: 2 },
                DocumentNode::PageBreak,
                DocumentNode::Paragraph(para("c")),
            ]
        );
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_leading_and_trailing_empty_pages() {
        let mut assembler = DocumentAssembler::new();
        assembler.push_page(1, vec![]);
        assembler.push_page(2, vec![para("x")]);
        assembler.push_page(3, vec![]);
        let doc = assembler.finish(Metadata::default());
        assert!(doc.check_invariants().is_ok());
        assert!(!doc.nodes.first().unwrap().is_page_break());
        assert!(!doc.nodes.last().unwrap().is_page_break());
    }

    #[test]
    fn test_assemble_pages() {
        let pages = vec![
            PageRuns::letter(1).with_runs(vec![TextRun::new("one", 10.0, 700.0, 12.0)]),
            PageRuns::letter(2).with_runs(vec![TextRun::new("two", 10.0, 700.0, 12.0)]),
        ];
        let doc = assemble(pages, &LayoutOptions::default()).unwrap();
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.page_break_count(), 1);
        assert_eq!(doc.plain_text(), "one\n\ntwo");
    }

    #[test]
    fn test_assemble_no_pages() {
        let result = assemble(Vec::new(), &LayoutOptions::default());
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_assemble_rejects_invalid_tolerance() {
        let page = || {
            PageRuns::letter(1).with_runs(vec![
                TextRun::new("top", 10.0, 700.0, 12.0),
                TextRun::new("bottom", 10.0, 100.0, 12.0),
            ])
        };
        for tolerance in [f32::NAN, 0.0, -1.0] {
            let options = LayoutOptions::new().with_y_tolerance(tolerance);
            let result = assemble(vec![page()], &options);
            assert!(matches!(result, Err(Error::InvalidOption(_))));
        }
    }
}
