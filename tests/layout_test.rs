//! Integration tests for line clustering, ordering, and style inference.

use pdf2word::layout::{cluster_runs, infer_alignment, layout_page, order_lines, Line};
use pdf2word::{
    assemble, Alignment, DocumentNode, LayoutOptions, PageRuns, Paragraph, TextRun,
};

fn run(text: &str, x: f32, y: f32) -> TextRun {
    TextRun::new(text, x, y, 12.0)
}

fn page_with_lines(number: u32, count: usize) -> PageRuns {
    let runs = (0..count)
        .map(|i| run(&format!("p{} line {}", number, i), 72.0, 700.0 - 30.0 * i as f32))
        .collect();
    PageRuns::letter(number).with_runs(runs)
}

fn texts(nodes: &[DocumentNode]) -> Vec<&str> {
    nodes
        .iter()
        .filter_map(|n| match n {
            DocumentNode::Paragraph(Paragraph { text, .. }) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ==================== Clustering ====================

#[test]
fn test_runs_within_tolerance_share_line_in_any_order() {
    let a = run("a", 10.0, 100.0);
    let b = run("b", 40.0, 104.9);

    let forward = cluster_runs(vec![a.clone(), b.clone()], 5.0);
    let backward = cluster_runs(vec![b, a], 5.0);
    assert_eq!(forward.len(), 1);
    assert_eq!(backward.len(), 1);
}

#[test]
fn test_runs_at_tolerance_never_share_line() {
    for (y1, y2) in [(100.0, 105.0), (100.0, 80.0), (0.0, -5.0)] {
        let a = run("a", 10.0, y1);
        let b = run("b", 40.0, y2);
        assert_eq!(cluster_runs(vec![a.clone(), b.clone()], 5.0).len(), 2);
        assert_eq!(cluster_runs(vec![b, a], 5.0).len(), 2);
    }
}

#[test]
fn test_smaller_tolerance_splits_lines() {
    let runs = vec![run("a", 10.0, 100.0), run("b", 40.0, 103.0)];
    assert_eq!(cluster_runs(runs.clone(), 5.0).len(), 1);
    assert_eq!(cluster_runs(runs, 2.0).len(), 2);
}

#[test]
fn test_non_finite_runs_dropped() {
    let runs = vec![
        run("nan", f32::NAN, 100.0),
        run("inf", 10.0, f32::INFINITY),
        run("ok", 10.0, 100.0),
    ];
    let lines = cluster_runs(runs, 5.0);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].runs[0].text, "ok");
}

// ==================== Reading order ====================

#[test]
fn test_reading_order_top_to_bottom() {
    let page = PageRuns::letter(1).with_runs(vec![
        run("bottom", 72.0, 600.0),
        run("top", 72.0, 700.0),
        run("middle", 72.0, 650.0),
    ]);
    let doc = assemble(vec![page], &LayoutOptions::default()).unwrap();
    assert_eq!(texts(&doc.nodes), vec!["top", "middle", "bottom"]);
}

#[test]
fn test_runs_ordered_left_to_right() {
    let lines = order_lines(cluster_runs(
        vec![run("c", 90.0, 100.0), run("a", 10.0, 100.0), run("b", 50.0, 101.0)],
        5.0,
    ));
    let order: Vec<&str> = lines[0].runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
}

// ==================== Joining ====================

#[test]
fn test_hello_world_joined_with_space() {
    let page = PageRuns::letter(1).with_runs(vec![run("World", 50.0, 100.0), run("Hello", 10.0, 100.0)]);
    let lines = layout_page(&page, &LayoutOptions::default());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Hello World");
}

#[test]
fn test_distant_baselines_never_merge() {
    let page = PageRuns::letter(1).with_runs(vec![run("Hello", 10.0, 100.0), run("World", 50.0, 80.0)]);
    let doc = assemble(vec![page], &LayoutOptions::default()).unwrap();
    assert_eq!(texts(&doc.nodes), vec!["Hello", "World"]);
}

// ==================== Alignment ====================

#[test]
fn test_alignment_threshold_on_600_wide_page() {
    let centered = Line::new(run("c", 250.0, 100.0).with_width(100.0), 0);
    let left = Line::new(run("l", 10.0, 100.0).with_width(90.0), 0);

    assert_eq!(infer_alignment(&centered, 600.0, 0.1), Alignment::Center);
    assert_eq!(infer_alignment(&left, 600.0, 0.1), Alignment::Left);
}

#[test]
fn test_alignment_in_paragraphs() {
    let page = PageRuns::new(1, 600.0, 800.0).with_runs(vec![
        run("Heading", 250.0, 700.0).with_width(100.0),
        run("Body text", 10.0, 650.0).with_width(90.0),
    ]);
    let doc = assemble(vec![page], &LayoutOptions::default()).unwrap();
    let alignments: Vec<Alignment> = doc.paragraphs().map(|p| p.alignment).collect();
    assert_eq!(alignments, vec![Alignment::Center, Alignment::Left]);
}

// ==================== Page breaks ====================

#[test]
fn test_page_breaks_with_empty_middle_page() {
    let pages = vec![
        page_with_lines(1, 2),
        page_with_lines(2, 0),
        page_with_lines(3, 1),
    ];
    let doc = assemble(pages, &LayoutOptions::default()).unwrap();

    assert_eq!(doc.page_break_count(), 2);
    assert_eq!(doc.paragraph_count(), 3);
    assert!(!doc.nodes.first().unwrap().is_page_break());
    assert!(!doc.nodes.last().unwrap().is_page_break());
    for pair in doc.nodes.windows(2) {
        assert!(!(pair[0].is_page_break() && pair[1].is_page_break()));
    }
    assert!(doc.check_invariants().is_ok());
}

#[test]
fn test_blank_runs_page_counts_as_empty() {
    let blank = PageRuns::letter(2).with_runs(vec![run("   ", 72.0, 700.0)]);
    let doc = assemble(
        vec![page_with_lines(1, 1), blank, page_with_lines(3, 1)],
        &LayoutOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.page_break_count(), 2);
    assert!(doc.nodes.contains(&DocumentNode::EmptyPage { page: 2 }));
}

#[test]
fn test_all_pages_empty() {
    let doc = assemble(
        vec![PageRuns::empty(1), PageRuns::empty(2)],
        &LayoutOptions::default(),
    )
    .unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.page_break_count(), 1);
    assert!(doc.check_invariants().is_ok());
}

// ==================== Font size ====================

#[test]
fn test_font_size_scaled_and_floored() {
    let page = PageRuns::letter(1).with_runs(vec![
        TextRun::new("big", 72.0, 700.0, 20.0),
        TextRun::new("tiny", 72.0, 600.0, 4.0),
    ]);
    let doc = assemble(vec![page], &LayoutOptions::default()).unwrap();
    let sizes: Vec<f32> = doc.paragraphs().map(|p| p.font_size).collect();
    assert_eq!(sizes, vec![30.0, 16.0]);
}
