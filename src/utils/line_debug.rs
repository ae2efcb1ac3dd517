// src/utils/line_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::extractors::config::{ExtractionConfig, WindowMode};
use crate::extractors::locator::match_section;
use crate::utils::error::StorageError;

/// Renders the page lines with what the extractor would see on each one:
/// section headers, gate markers and field labels. Handy when the report
/// layout drifts and a hospital suddenly disappears from the table.
pub fn annotate_lines<S: AsRef<str>>(lines: &[S], config: &ExtractionConfig) -> String {
    let names: Vec<&str> = config.sections.iter().map(|s| s.name.as_str()).collect();
    let markers: Vec<&str> = config
        .sections
        .iter()
        .filter_map(|s| match &s.window {
            WindowMode::Gated { marker, .. } => Some(marker.as_str()),
            _ => None,
        })
        .collect();
    let labels = config.field_labels();

    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let mut tags = Vec::new();

        if let Some(section) = match_section(line, &names) {
            tags.push(format!("section: {}", names[section]));
        }
        if markers.iter().any(|m| line.contains(m)) {
            tags.push("marker".to_string());
        }
        for label in labels.iter().filter(|l| line.contains(*l)) {
            tags.push(format!("field: {}", label));
        }

        let tags = if tags.is_empty() { String::new() } else { format!("[{}] ", tags.join("; ")) };
        out.push_str(&format!("{:04} {}{}\n", idx, tags, line));
    }
    out
}

/// Writes the annotated line dump to `filename`.
pub fn save_line_dump<S: AsRef<str>>(
    lines: &[S],
    config: &ExtractionConfig,
    filename: &Path,
) -> Result<(), StorageError> {
    let mut file = File::create(filename)?;
    file.write_all(annotate_lines(lines, config).as_bytes())?;

    tracing::info!("Saved annotated line dump to {}", filename.display());
    Ok(())
}
