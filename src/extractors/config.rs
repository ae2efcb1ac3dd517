// src/extractors/config.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// --- Constants ---
/// Upper bound on any window span. The report is a single page; anything
/// larger is a typo in the profile.
pub const MAX_BLOCK_SIZE: usize = 200;

pub const DEFAULT_GATE_MARKER: &str = "Emergency Department";
pub const DEFAULT_GATED_SPAN: usize = 20;

const DEFAULT_HOSPITALS: [&str; 3] = [
    "Royal University Hospital",
    "Saskatoon City Hospital",
    "Jim Pattison Children's Hospital",
];
const DEFAULT_FIELDS: [&str; 2] = ["Patients in Department", "Waiting for Inpatient Bed"];

// --- Data Structures ---

/// How a value is pulled out of the line that carries a field label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionRule {
    /// First run of decimal digits anywhere on the line.
    Numeric,
    /// Trimmed text after the first colon, verbatim.
    Colon,
}

/// Which lines after a section header are eligible for field extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowMode {
    /// The `span` lines directly below the header.
    Immediate { span: usize },
    /// The `span` lines below the header, starting at the first line that
    /// contains `marker`. No marker, no window.
    Gated { span: usize, marker: String },
    /// Everything below the header until the next section.
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub rule: ExtractionRule,
}

/// One named section (a hospital) and what to pull out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub window: WindowMode,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Declaration order is both the match priority and the output order.
    pub sections: Vec<SectionSpec>,
    /// When a candidate line has no extractable value, keep looking at later
    /// lines carrying the same label instead of giving up on the field.
    #[serde(default)]
    pub scan_past_malformed: bool,
}

impl FieldSpec {
    pub fn numeric(label: &str) -> Self {
        Self { label: label.to_string(), rule: ExtractionRule::Numeric }
    }

    #[cfg(test)]
    pub fn colon(label: &str) -> Self {
        Self { label: label.to_string(), rule: ExtractionRule::Colon }
    }
}

impl WindowMode {
    pub fn gated(span: usize, marker: &str) -> Self {
        WindowMode::Gated { span, marker: marker.to_string() }
    }

    fn span(&self) -> Option<usize> {
        match self {
            WindowMode::Immediate { span } | WindowMode::Gated { span, .. } => Some(*span),
            WindowMode::Open => None,
        }
    }
}

impl SectionSpec {
    pub fn new(name: &str, window: WindowMode, fields: Vec<FieldSpec>) -> Self {
        Self { name: name.to_string(), window, fields }
    }
}

impl Default for ExtractionConfig {
    /// The Saskatoon bed capacity report: three hospitals, each with an
    /// "Emergency Department" block holding the two census numbers.
    fn default() -> Self {
        let sections = DEFAULT_HOSPITALS
            .iter()
            .map(|name| {
                SectionSpec::new(
                    name,
                    WindowMode::gated(DEFAULT_GATED_SPAN, DEFAULT_GATE_MARKER),
                    DEFAULT_FIELDS.iter().map(|label| FieldSpec::numeric(label)).collect(),
                )
            })
            .collect();

        Self { sections, scan_past_malformed: false }
    }
}

impl ExtractionConfig {
    /// Parses a TOML extraction profile and validates it.
    pub fn from_toml(text: &str) -> Result<Self, ExtractError> {
        let config: ExtractionConfig =
            toml::from_str(text).map_err(|e| ExtractError::ProfileParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Field labels across all sections, first-seen order. Used for column order.
    pub fn field_labels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|f| f.label.as_str())
            .filter(|label| seen.insert(*label))
            .collect()
    }

    /// Rejects configurations that contradict themselves. These are caller
    /// bugs and must fail before any document is looked at.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.sections.is_empty() {
            return Err(invalid("no sections configured"));
        }

        let mut names = HashSet::new();
        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(invalid("section with an empty name"));
            }
            if !names.insert(section.name.as_str()) {
                return Err(invalid(&format!("duplicate section '{}'", section.name)));
            }

            if let Some(span) = section.window.span() {
                if span == 0 || span > MAX_BLOCK_SIZE {
                    return Err(invalid(&format!(
                        "section '{}': span {} outside 1..={}",
                        section.name, span, MAX_BLOCK_SIZE
                    )));
                }
            }
            if let WindowMode::Gated { marker, .. } = &section.window {
                if marker.trim().is_empty() {
                    return Err(invalid(&format!("section '{}': empty gate marker", section.name)));
                }
            }

            if section.fields.is_empty() {
                return Err(invalid(&format!("section '{}' has no fields", section.name)));
            }
            let mut labels = HashSet::new();
            for field in &section.fields {
                if field.label.trim().is_empty() {
                    return Err(invalid(&format!("section '{}': empty field label", section.name)));
                }
                if !labels.insert(field.label.as_str()) {
                    return Err(invalid(&format!(
                        "section '{}': duplicate field '{}'",
                        section.name, field.label
                    )));
                }
            }
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> ExtractError {
    ExtractError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sections.len(), 3);
        assert_eq!(config.sections[0].name, "Royal University Hospital");
        assert_eq!(
            config.field_labels(),
            vec!["Patients in Department", "Waiting for Inpatient Bed"]
        );
    }

    #[test]
    fn parses_toml_profile() {
        let profile = r#"
            scan_past_malformed = true

            [[sections]]
            name = "Hospital A"
            window = { mode = "gated", span = 5, marker = "Emergency Department" }
            fields = [
                { label = "Patients in Department", rule = "numeric" },
                { label = "Status", rule = "colon" },
            ]

            [[sections]]
            name = "Hospital B"
            window = { mode = "immediate", span = 4 }
            fields = [{ label = "Patients in Department", rule = "numeric" }]

            [[sections]]
            name = "Hospital C"
            window = { mode = "open" }
            fields = [{ label = "Patients in Department", rule = "numeric" }]
        "#;

        let config = ExtractionConfig::from_toml(profile).unwrap();
        assert!(config.scan_past_malformed);
        assert_eq!(config.sections[0].window, WindowMode::gated(5, "Emergency Department"));
        assert_eq!(config.sections[0].fields[1], FieldSpec::colon("Status"));
        assert_eq!(config.sections[1].window, WindowMode::Immediate { span: 4 });
        assert_eq!(config.sections[2].window, WindowMode::Open);
        assert_eq!(config.field_labels(), vec!["Patients in Department", "Status"]);
    }

    #[test]
    fn shipped_profile_matches_builtin() {
        let shipped = ExtractionConfig::from_toml(include_str!("../../profiles/saskatoon.toml")).unwrap();
        assert_eq!(shipped, ExtractionConfig::default());
    }

    #[test]
    fn field_without_rule_is_a_parse_error() {
        let profile = r#"
            [[sections]]
            name = "Hospital A"
            window = { mode = "open" }
            fields = [{ label = "Patients in Department" }]
        "#;

        let err = ExtractionConfig::from_toml(profile).unwrap_err();
        assert!(matches!(err, ExtractError::ProfileParse(_)));
    }

    #[test]
    fn rejects_contradictory_configs() {
        let field = || vec![FieldSpec::numeric("Patients")];

        let empty = ExtractionConfig { sections: vec![], scan_past_malformed: false };
        assert!(empty.validate().is_err());

        let dup = ExtractionConfig {
            sections: vec![
                SectionSpec::new("A", WindowMode::Open, field()),
                SectionSpec::new("A", WindowMode::Open, field()),
            ],
            scan_past_malformed: false,
        };
        assert!(dup.validate().is_err());

        let zero_span = ExtractionConfig {
            sections: vec![SectionSpec::new("A", WindowMode::Immediate { span: 0 }, field())],
            scan_past_malformed: false,
        };
        assert!(zero_span.validate().is_err());

        let huge_span = ExtractionConfig {
            sections: vec![SectionSpec::new("A", WindowMode::gated(MAX_BLOCK_SIZE + 1, "ED"), field())],
            scan_past_malformed: false,
        };
        assert!(huge_span.validate().is_err());

        let no_marker = ExtractionConfig {
            sections: vec![SectionSpec::new("A", WindowMode::gated(5, " "), field())],
            scan_past_malformed: false,
        };
        assert!(no_marker.validate().is_err());

        let no_fields = ExtractionConfig {
            sections: vec![SectionSpec::new("A", WindowMode::Open, vec![])],
            scan_past_malformed: false,
        };
        assert!(no_fields.validate().is_err());

        let dup_field = ExtractionConfig {
            sections: vec![SectionSpec::new(
                "A",
                WindowMode::Open,
                vec![FieldSpec::numeric("X"), FieldSpec::colon("X")],
            )],
            scan_past_malformed: false,
        };
        assert!(dup_field.validate().is_err());
    }
}
