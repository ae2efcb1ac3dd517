// src/render/template.rs
use chrono::{DateTime, FixedOffset, Offset, Utc};

pub const TABLE_PLACEHOLDER: &str = "{{data_table}}";
pub const TIME_PLACEHOLDER: &str = "{{update_time}}";

/// Saskatchewan stays on Central Standard Time all year.
const SASKATCHEWAN_OFFSET_SECS: i32 = -6 * 3600;

/// Substitutes the table and timestamp into the page template.
pub fn fill(template: &str, table_html: &str, update_time: &str) -> String {
    template
        .replace(TABLE_PLACEHOLDER, table_html)
        .replace(TIME_PLACEHOLDER, update_time)
}

/// e.g. "March 04, 2025 at 09:15:02 AM CST"
pub fn format_update_time(now: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(SASKATCHEWAN_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
        .format("%B %d, %Y at %I:%M:%S %p CST")
        .to_string()
}
