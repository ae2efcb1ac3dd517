// src/extractors/window.rs
use super::config::WindowMode;
use std::ops::Range;

/// Computes the line range eligible for field extraction for a section whose
/// header sits at `start`.
///
/// `boundary` is the first line owned by another section (see
/// [`SectionMap::boundary_after`](super::locator::SectionMap::boundary_after));
/// the range never reaches it. Returns `None` when a gated window finds no
/// marker inside its span.
pub fn scope_window<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    boundary: usize,
    mode: &WindowMode,
) -> Option<Range<usize>> {
    let limit = boundary.min(lines.len());
    let first = (start + 1).min(limit);

    match mode {
        WindowMode::Immediate { span } => Some(first..(first + span).min(limit)),
        WindowMode::Gated { span, marker } => {
            let span_end = (first + span).min(limit);
            let gate = (first..span_end).find(|&idx| lines[idx].as_ref().contains(marker.as_str()))?;
            tracing::trace!("Gate marker '{}' found at line {}", marker, gate);
            Some(gate..span_end)
        }
        WindowMode::Open => Some(first..limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [&str; 8] = [
        "Hospital A",
        "Beds 40",
        "Emergency Department",
        "Patients in Department 12",
        "Waiting for Inpatient Bed 3",
        "Hospital B",
        "Emergency Department",
        "Patients in Department 7",
    ];

    #[test]
    fn immediate_takes_lines_below_header() {
        assert_eq!(scope_window(&LINES, 0, 5, &WindowMode::Immediate { span: 2 }), Some(1..3));
    }

    #[test]
    fn immediate_is_truncated_at_next_section() {
        assert_eq!(scope_window(&LINES, 0, 5, &WindowMode::Immediate { span: 20 }), Some(1..5));
    }

    #[test]
    fn gated_starts_at_marker() {
        assert_eq!(
            scope_window(&LINES, 0, 5, &WindowMode::gated(20, "Emergency Department")),
            Some(2..5)
        );
    }

    #[test]
    fn gated_does_not_borrow_the_next_sections_marker() {
        // Hospital A's only marker candidate after truncation is its own.
        let lines = ["Hospital A", "Patients in Department 9", "Hospital B", "Emergency Department"];
        assert_eq!(scope_window(&lines, 0, 2, &WindowMode::gated(20, "Emergency Department")), None);
    }

    #[test]
    fn gated_marker_outside_span_is_missing() {
        assert_eq!(scope_window(&LINES, 0, 5, &WindowMode::gated(1, "Emergency Department")), None);
    }

    #[test]
    fn open_runs_to_boundary_or_end() {
        assert_eq!(scope_window(&LINES, 0, 5, &WindowMode::Open), Some(1..5));
        assert_eq!(scope_window(&LINES, 5, LINES.len(), &WindowMode::Open), Some(6..8));
    }

    #[test]
    fn header_on_last_line_gives_empty_window() {
        assert_eq!(scope_window(&LINES, 7, 8, &WindowMode::Immediate { span: 4 }), Some(8..8));
        assert_eq!(scope_window(&LINES, 7, 8, &WindowMode::gated(4, "Emergency Department")), None);
    }
}
