//! Document model types.
//!
//! Two vocabularies live here: the positioned [`TextRun`]s handed over by a
//! text-run provider, and the [`Document`] node sequence handed to a
//! serializer. The layout engine translates the former into the latter.

mod document;
mod page;
mod paragraph;
mod run;

pub use document::{Document, DocumentNode, InvariantViolation, Metadata};
pub use page::PageRuns;
pub use paragraph::{Alignment, Paragraph};
pub use run::TextRun;
