// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::ResultSet;
use crate::utils::error::StorageError;

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing the generated page to `output_path`.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let output_path = output_path.as_ref().to_path_buf();

        // Create the parent directory if it doesn't exist
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_path })
    }

    /// Reads the page template. A missing template is fatal for the run.
    pub fn load_template<P: AsRef<Path>>(&self, path: P) -> Result<String, StorageError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StorageError::TemplateNotFound(path.display().to_string()));
        }
        fs::read_to_string(path).map_err(StorageError::IoError)
    }

    /// Writes the generated page, replacing the previous one.
    pub fn save_page(&self, html: &str) -> Result<PathBuf, StorageError> {
        fs::write(&self.output_path, html).map_err(StorageError::IoError)?;
        tracing::info!("Saved page to {}", self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// Writes this run's results as JSON alongside a generation timestamp.
    pub fn save_results<P: AsRef<Path>>(&self, results: &ResultSet, path: P) -> Result<PathBuf, StorageError> {
        let path = path.as_ref().to_path_buf();

        let snapshot = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "hospitals": results,
        });
        let snapshot_str = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&path, snapshot_str).map_err(StorageError::IoError)?;
        tracing::info!("Saved results to {}", path.display());
        Ok(path)
    }

    /// Path for a debug artifact written next to the generated page.
    pub fn sibling_path(&self, file_name: &str) -> PathBuf {
        self.output_path.with_file_name(file_name)
    }
}
