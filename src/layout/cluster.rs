//! Grouping of a page's runs into lines.

use super::Line;
use crate::model::TextRun;

/// Group unordered runs into lines by baseline proximity.
///
/// Each line keeps the baseline of its first run as a fixed anchor; later
/// runs join the nearest anchor strictly closer than `y_tolerance` and never
/// move it, so a line cannot drift down the page as runs accumulate. Lines
/// are returned in anchor creation order.
///
/// Runs with a non-finite origin are dropped with a warning; runs with empty
/// text are dropped silently.
pub fn cluster_runs(runs: Vec<TextRun>, y_tolerance: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut dropped = 0usize;

    for run in runs {
        if !run.is_positioned() {
            dropped += 1;
            continue;
        }
        if run.is_empty() {
            continue;
        }

        match nearest_anchor(&lines, run.y, y_tolerance) {
            Some(idx) => lines[idx].runs.push(run),
            None => {
                let seq = lines.len();
                lines.push(Line::new(run, seq));
            }
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {} text runs without a finite position", dropped);
    }

    lines
}

/// Index of the anchor closest to `y` within tolerance; ties keep the
/// earliest anchor.
fn nearest_anchor(lines: &[Line], y: f32, y_tolerance: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, line) in lines.iter().enumerate() {
        let dist = (y - line.y).abs();
        if dist >= y_tolerance {
            continue;
        }
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, x: f32, y: f32) -> TextRun {
        TextRun::new(text, x, y, 12.0)
    }

    #[test]
    fn test_runs_within_tolerance_share_line() {
        let lines = cluster_runs(vec![run("a", 0.0, 100.0), run("b", 20.0, 103.0)], 5.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].runs.len(), 2);
        assert_eq!(lines[0].y, 100.0);
    }

    #[test]
    fn test_runs_at_tolerance_split() {
        let lines = cluster_runs(vec![run("a", 0.0, 100.0), run("b", 0.0, 105.0)], 5.0);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_anchor_does_not_drift() {
        // 104 joins the 100 anchor; 108 is 8 away from the anchor and must
        // start its own line even though it is close to 104.
        let lines = cluster_runs(
            vec![run("a", 0.0, 100.0), run("b", 0.0, 104.0), run("c", 0.0, 108.0)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].runs.len(), 2);
        assert_eq!(lines[1].y, 108.0);
    }

    #[test]
    fn test_nearest_anchor_wins() {
        let lines = cluster_runs(
            vec![run("a", 0.0, 100.0), run("b", 0.0, 106.0), run("c", 0.0, 104.5)],
            5.0,
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].runs.len(), 2);
        assert_eq!(lines[1].runs[1].text, "c");
    }

    #[test]
    fn test_drops_unpositioned_and_empty_runs() {
        let lines = cluster_runs(
            vec![
                run("a", 0.0, f32::NAN),
                run("", 0.0, 50.0),
                run("b", f32::INFINITY, 10.0),
                run("c", 0.0, 10.0),
            ],
            5.0,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].runs[0].text, "c");
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_runs(Vec::new(), 5.0).is_empty());
    }
}
