// src/utils/error.rs
use thiserror::Error;

// One error type per stage of the run
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Report not found at {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("PDF contains no pages")]
    NoPages,
}

/// Structural problems only. Layout drift in the document never ends up here,
/// it just yields fewer fields.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid extraction config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse extraction profile: {0}")]
    ProfileParse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
