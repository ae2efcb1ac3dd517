// src/main.rs
mod utils;
mod source;
mod extractors;
mod render;
mod storage;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use extractors::{ExtractionConfig, ResultSet, SectionExtractor};
use render::{table, template};
use source::{client, pdf};
use storage::StorageManager;
use utils::AppError;

/// Emergency department occupancy page generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the bed capacity report PDF
    #[arg(short, long, default_value = client::DEFAULT_REPORT_URL)]
    url: String,

    /// Read the report from a local PDF instead of downloading it
    #[arg(long, conflicts_with = "url")]
    input_pdf: Option<PathBuf>,

    /// Download timeout in seconds
    #[arg(long, default_value_t = client::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Page template containing {{data_table}} and {{update_time}}
    #[arg(short, long, default_value = "template.html")]
    template: PathBuf,

    /// Generated page
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,

    /// TOML extraction profile (defaults to the built-in Saskatoon hospitals)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Also write the extracted results as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug mode - save an annotated dump of the report's text lines
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments and set up logging (RUST_LOG overrides)
    let args = Args::parse();
    utils::logging::setup_logging(if args.debug { "debug" } else { "info" });
    tracing::info!("Starting run with args: {:?}", args);

    if args.timeout_secs == 0 {
        return Err(AppError::Config("--timeout-secs must be at least 1".to_string()));
    }

    // 2. Load the extraction profile; a bad one stops the run before any download
    let config = match &args.profile {
        Some(path) => {
            tracing::info!("Loading extraction profile: {}", path.display());
            ExtractionConfig::from_toml(&std::fs::read_to_string(path)?)?
        }
        None => ExtractionConfig::default(),
    };
    let extractor = SectionExtractor::new(config)?;

    // 3. Storage and template
    let storage = StorageManager::new(&args.output)?;
    let page_template = storage.load_template(&args.template)?;

    // 4. Get the report and build the table
    let report = load_report(&args).await;
    let table_html = build_table(report, &extractor, &storage, &args)?;

    // 5. Fill the template and write the page
    let update_time = template::format_update_time(chrono::Utc::now());
    let page = template::fill(&page_template, &table_html, &update_time);
    let path = storage.save_page(&page)?;

    tracing::info!("Successfully generated {} at {}", path.display(), update_time);
    Ok(())
}

async fn load_report(args: &Args) -> Result<Vec<u8>, AppError> {
    match &args.input_pdf {
        Some(path) => {
            tracing::info!("Reading report from file: {}", path.display());
            Ok(std::fs::read(path)?)
        }
        None => Ok(client::fetch_report(&args.url, Duration::from_secs(args.timeout_secs)).await?),
    }
}

/// Turns the outcome of getting the report into the table HTML. A failed
/// download gets its own notice; a report that could not be read at all
/// renders the no-data notice.
fn build_table(
    report: Result<Vec<u8>, AppError>,
    extractor: &SectionExtractor,
    storage: &StorageManager,
    args: &Args,
) -> Result<String, AppError> {
    let bytes = match report {
        Ok(bytes) => bytes,
        Err(AppError::Fetch(e)) => {
            tracing::error!("Error downloading report: {}", e);
            return Ok(table::download_failed_notice());
        }
        Err(e) => {
            tracing::error!("Could not read report: {}", e);
            return Ok(table::no_data_notice());
        }
    };

    let results = extract_results(extractor, &bytes, storage, args);
    if let Some(json_path) = &args.json {
        storage.save_results(&results, json_path)?;
    }
    Ok(table::render_table(&results, &extractor.config().field_labels()))
}

/// Converts the report to lines and runs the extractor. A report that cannot
/// be read as a PDF yields no results, which renders the "no data" notice.
fn extract_results(
    extractor: &SectionExtractor,
    pdf_bytes: &[u8],
    storage: &StorageManager,
    args: &Args,
) -> ResultSet {
    let lines = match pdf::first_page_lines(pdf_bytes) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!("An error occurred during PDF parsing: {}", e);
            return ResultSet::default();
        }
    };

    if args.debug {
        let dump_path = storage.sibling_path("report_lines.txt");
        if let Err(e) = utils::line_debug::save_line_dump(&lines, extractor.config(), &dump_path) {
            tracing::warn!("Failed to save line dump: {}", e);
        }
    }

    let results = extractor.extract(&lines);
    if results.is_empty() {
        tracing::warn!("No statistics could be extracted from {} lines", lines.len());
    } else {
        tracing::info!("Parsed stats for {} hospitals", results.len());
    }
    tracing::debug!("Final parsed data: {:?}", results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use std::path::Path;

    fn setup(dir: &Path, extra: &[&str]) -> (Args, StorageManager, SectionExtractor) {
        let output = dir.join("index.html");
        let mut argv = vec!["er_occupancy", "--output", output.to_str().unwrap()];
        argv.extend_from_slice(extra);
        let args = Args::parse_from(argv);
        let storage = StorageManager::new(&args.output).unwrap();
        let extractor = SectionExtractor::new(ExtractionConfig::default()).unwrap();
        (args, storage, extractor)
    }

    #[test]
    fn failed_download_renders_download_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (args, storage, extractor) = setup(dir.path(), &[]);

        let report = Err(AppError::Fetch(FetchError::NotFound(client::DEFAULT_REPORT_URL.to_string())));
        let html = build_table(report, &extractor, &storage, &args).unwrap();
        assert_eq!(html, table::download_failed_notice());
    }

    #[test]
    fn unreadable_local_report_renders_no_data_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (args, storage, extractor) = setup(dir.path(), &[]);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "report.pdf");
        let html = build_table(Err(AppError::Io(missing)), &extractor, &storage, &args).unwrap();
        assert_eq!(html, table::no_data_notice());
    }

    #[test]
    fn unparsable_pdf_renders_no_data_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (args, storage, extractor) = setup(dir.path(), &[]);

        let html = build_table(Ok(b"not a pdf".to_vec()), &extractor, &storage, &args).unwrap();
        assert_eq!(html, table::no_data_notice());
    }

    #[test]
    fn readable_report_renders_table_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("results.json");
        let (args, storage, extractor) = setup(dir.path(), &["--json", json_path.to_str().unwrap()]);

        let pdf_bytes = pdf::make_test_pdf(&[
            "Royal University Hospital",
            "Emergency Department",
            "Patients in Department 42",
            "Waiting for Inpatient Bed 7",
        ]);
        let html = build_table(Ok(pdf_bytes), &extractor, &storage, &args).unwrap();

        assert!(html.contains("<table"), "got: {html}");
        assert!(html.contains("<td>Royal University Hospital</td>"), "got: {html}");
        assert!(html.contains("<td>42</td>"), "got: {html}");

        let saved = std::fs::read_to_string(json_path).unwrap();
        assert!(saved.contains("Royal University Hospital"));
    }
}
