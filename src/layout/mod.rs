//! Layout reconstruction: from positioned runs to styled lines.
//!
//! A page pass runs [`cluster_runs`] to group runs into baseline bands,
//! [`order_lines`] to put them in reading order, [`join_run_text`] to build
//! the line text, and [`infer_style`] to recover alignment and font size.
//! [`layout_page`] chains these steps for one page.

mod cluster;
mod line;
mod options;
mod order;
mod style;

pub use cluster::cluster_runs;
pub use line::{Line, StyledLine};
pub use options::{FontScale, LayoutOptions};
pub use order::{join_run_text, order_lines};
pub use style::{infer_alignment, infer_style, LineStyle};

use crate::model::{PageRuns, Paragraph};

/// Reconstruct the styled lines of one page in reading order.
///
/// Lines whose joined text is blank are dropped.
pub fn layout_page(page: &PageRuns, options: &LayoutOptions) -> Vec<StyledLine> {
    let lines = cluster_runs(page.runs.clone(), options.y_tolerance);
    let clustered = lines.len();
    let lines = order_lines(lines);

    let styled: Vec<StyledLine> = lines
        .iter()
        .filter_map(|line| {
            let text = join_run_text(line, options.y_tolerance);
            if text.trim().is_empty() {
                return None;
            }
            let style = infer_style(line, page.width, options);
            Some(StyledLine {
                text,
                alignment: style.alignment,
                font_size: style.font_size,
            })
        })
        .collect();

    log::debug!(
        "Page {}: {} runs, {} lines, {} non-blank",
        page.number,
        page.runs.len(),
        clustered,
        styled.len()
    );

    styled
}

impl From<StyledLine> for Paragraph {
    fn from(line: StyledLine) -> Self {
        Paragraph {
            text: line.text,
            alignment: line.alignment,
            font_size: line.font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, TextRun};

    #[test]
    fn test_layout_page_reading_order() {
        let page = PageRuns::new(1, 600.0, 800.0).with_runs(vec![
            TextRun::new("World", 50.0, 100.0, 12.0),
            TextRun::new("Title", 280.0, 700.0, 20.0).with_width(40.0),
            TextRun::new("Hello", 10.0, 100.0, 12.0),
        ]);
        let lines = layout_page(&page, &LayoutOptions::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Title");
        assert_eq!(lines[0].alignment, Alignment::Center);
        assert_eq!(lines[0].font_size, 30.0);
        assert_eq!(lines[1].text, "Hello World");
        assert_eq!(lines[1].alignment, Alignment::Left);
    }

    #[test]
    fn test_layout_page_drops_blank_lines() {
        let page = PageRuns::letter(1).with_runs(vec![
            TextRun::new("   ", 10.0, 500.0, 12.0),
            TextRun::new("text", 10.0, 400.0, 12.0),
        ]);
        let lines = layout_page(&page, &LayoutOptions::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "text");
    }
}
