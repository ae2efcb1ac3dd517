// src/render/table.rs
use crate::extractors::ResultSet;

pub const NAME_COLUMN: &str = "Hospital";
pub const MISSING_VALUE: &str = "N/A";

const TABLE_CLASSES: &str = "table table-striped table-hover";

pub fn no_data_notice() -> String {
    "<p class='text-danger'><b>No data available.</b> The scraper ran successfully but could not \
     extract any statistics from the source PDF. The format may have temporarily changed.</p>"
        .to_string()
}

pub fn download_failed_notice() -> String {
    "<p class='text-danger'><b>Error:</b> Failed to download the data source PDF.</p>".to_string()
}

/// Renders the results as an HTML table: the name column, then each of
/// `columns` that at least one record has, in the given order. Gaps are
/// filled with `N/A`. An empty result set renders the no-data notice.
pub fn render_table(results: &ResultSet, columns: &[&str]) -> String {
    if results.is_empty() {
        return no_data_notice();
    }

    let present: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|col| results.records().iter().any(|r| r.get(col).is_some()))
        .collect();

    let mut html = format!("<table border=\"0\" class=\"dataframe {}\">\n", TABLE_CLASSES);
    html.push_str("  <thead>\n    <tr style=\"text-align: left;\">\n");
    for header in std::iter::once(NAME_COLUMN).chain(present.iter().copied()) {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(header)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for record in results.records() {
        html.push_str("    <tr>\n");
        html.push_str(&format!("      <td>{}</td>\n", escape_html(&record.name)));
        for col in &present {
            let value = record.get(col).unwrap_or(MISSING_VALUE);
            html.push_str(&format!("      <td>{}</td>\n", escape_html(value)));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
