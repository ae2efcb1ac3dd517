// src/extractors/fields.rs

// --- Imports ---
use super::config::{ExtractionRule, FieldSpec};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// ASCII only; `\d` would also accept Arabic-Indic or full-width digits.
static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("Failed to compile DIGIT_RUN_RE"));

/// Applies `rule` to a line already known to carry the field label.
/// `None` means the line is malformed for that rule.
pub fn extract_value(line: &str, rule: ExtractionRule) -> Option<String> {
    match rule {
        ExtractionRule::Numeric => DIGIT_RUN_RE.find(line).map(|m| m.as_str().to_string()),
        ExtractionRule::Colon => {
            let (_, rest) = line.split_once(':')?;
            let value = rest.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
    }
}

/// Pulls every configured field out of `window`.
///
/// Each label takes the value from the first line that contains it; later
/// lines with the same label are ignored. If that first line is malformed the
/// field is absent, unless `scan_past_malformed` lets the scan move on to the
/// next line carrying the label.
pub fn extract_fields<S: AsRef<str>>(
    window: &[S],
    fields: &[FieldSpec],
    scan_past_malformed: bool,
) -> BTreeMap<String, String> {
    let mut found = BTreeMap::new();

    for field in fields {
        let candidates = window
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| line.contains(field.label.as_str()));

        for line in candidates {
            match extract_value(line, field.rule) {
                Some(value) => {
                    tracing::debug!("  - Parsed Stat: '{}' = '{}'", field.label, value);
                    found.insert(field.label.clone(), value);
                    break;
                }
                None if scan_past_malformed => {
                    tracing::debug!("  - '{}' line has no value, trying next: '{}'", field.label, line);
                }
                None => {
                    tracing::debug!("  - '{}' line has no value: '{}'", field.label, line);
                    break;
                }
            }
        }
    }

    found
}
