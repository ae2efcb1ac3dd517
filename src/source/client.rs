// src/source/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::time::Duration;

/// The Saskatoon hospital bed capacity report, republished several times a day.
pub const DEFAULT_REPORT_URL: &str =
    "https://www.ehealthsask.ca/reporting/Documents/SaskatoonHospitalBedCapacity.pdf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("er_occupancy/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client with our User-Agent and an overall request timeout.
fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Downloads the report and returns the raw bytes.
pub async fn fetch_report(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let client = build_client(timeout)?;

    tracing::info!("Downloading report from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/pdf,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::info!("Download successful ({} bytes)", body.len());

    Ok(body.to_vec())
}
