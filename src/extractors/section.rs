// src/extractors/section.rs

// --- Imports ---
use super::config::ExtractionConfig;
use super::fields::extract_fields;
use super::locator::locate_sections;
use super::window::scope_window;
use crate::utils::error::ExtractError;
use serde::Serialize;
use std::collections::BTreeMap;

// --- Data Structures ---

/// Statistics pulled for one section. Fields that were not found are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub stats: BTreeMap<String, String>,
}

/// Records in configured section order. Sections that produced nothing are
/// left out, so an empty set means nothing at all could be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl Record {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.stats.get(label).map(String::as_str)
    }
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }
}

// --- Main Extractor Structure ---

/// Line-based section extractor. Holds a validated configuration; extraction
/// itself is a pure function of the input lines.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    config: ExtractionConfig,
}

impl SectionExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Locates each configured section, scopes its window and pulls its fields.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> ResultSet {
        if lines.is_empty() {
            tracing::warn!("No text lines to extract from");
            return ResultSet::default();
        }

        let names: Vec<&str> = self.config.sections.iter().map(|s| s.name.as_str()).collect();
        let map = locate_sections(lines, &names);

        let mut records = Vec::new();
        for (idx, section) in self.config.sections.iter().enumerate() {
            let Some(start) = map.starts[idx] else {
                tracing::debug!("Section '{}' not found in document", section.name);
                continue;
            };

            let boundary = map.boundary_after(start, lines.len());
            let Some(range) = scope_window(lines, start, boundary, &section.window) else {
                tracing::debug!("Section '{}': gate marker missing, skipping", section.name);
                continue;
            };
            tracing::debug!("Section '{}': window lines {:?}", section.name, range);

            let stats = extract_fields(&lines[range], &section.fields, self.config.scan_past_malformed);
            if stats.is_empty() {
                tracing::debug!("Section '{}': no fields found", section.name);
                continue;
            }

            records.push(Record { name: section.name.clone(), stats });
        }

        tracing::info!("Extracted stats for {} of {} sections", records.len(), self.config.sections.len());
        ResultSet { records }
    }
}
