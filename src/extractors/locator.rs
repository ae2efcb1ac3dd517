// src/extractors/locator.rs

/// A point in the line sequence where the current section changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub line: usize,
    /// Index into the configured section list.
    pub section: usize,
}

/// Result of the locating pass over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    /// Every change of current section, in line order.
    pub transitions: Vec<Transition>,
    /// First header line of each configured section, `None` if never seen.
    pub starts: Vec<Option<usize>>,
}

impl SectionMap {
    /// First line at or after which `section` is no longer current: the next
    /// transition following `start`, or the end of the document.
    pub fn boundary_after(&self, start: usize, line_count: usize) -> usize {
        self.transitions
            .iter()
            .find(|t| t.line > start)
            .map(|t| t.line)
            .unwrap_or(line_count)
    }
}

/// Returns the section owning `line`. Names are tried in declaration order and
/// the first contained one wins, so overlapping names resolve the same way
/// every run.
pub fn match_section(line: &str, names: &[&str]) -> Option<usize> {
    names.iter().position(|name| line.contains(name))
}

/// Single pass over the lines, carrying the current section as explicit state.
/// A line with no section name leaves the state untouched.
pub fn locate_sections<S: AsRef<str>>(lines: &[S], names: &[&str]) -> SectionMap {
    let mut transitions = Vec::new();
    let mut starts = vec![None; names.len()];
    let mut current: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let Some(found) = match_section(line.as_ref(), names) else {
            continue;
        };
        if current == Some(found) {
            continue;
        }

        tracing::debug!("--- Switched to section: {} (line {}) ---", names[found], idx);
        transitions.push(Transition { line: idx, section: found });
        if starts[found].is_none() {
            starts[found] = Some(idx);
        }
        current = Some(found);
    }

    SectionMap { transitions, starts }
}
