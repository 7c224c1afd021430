//! Reading-order sorting of lines and runs, and run text joining.

use super::Line;

/// Sort runs left-to-right within each line and lines top-to-bottom.
///
/// PDF Y grows upward, so the top of the page has the largest Y. Lines are
/// ordered by anchor Y descending and then by creation order, which makes
/// the order total: two lines never compare equal.
pub fn order_lines(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        line.runs.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    lines.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.seq.cmp(&b.seq)));
    lines
}

/// Join the run texts of an ordered line.
///
/// A single space separates two neighbouring runs whose baselines are
/// within `y_tolerance` of each other. Runs that were clustered together
/// but sit further apart vertically (sub- and superscripts on either side
/// of the anchor) are glued without a separator.
pub fn join_run_text(line: &Line, y_tolerance: f32) -> String {
    let mut result = String::new();
    for (i, run) in line.runs.iter().enumerate() {
        if i > 0 {
            let prev = &line.runs[i - 1];
            if (run.y - prev.y).abs() < y_tolerance {
                result.push(' ');
            }
        }
        result.push_str(&run.text);
    }
    result
}
