// src/extractors/mod.rs
pub mod config;
pub mod fields;
pub mod locator;
pub mod section;
pub mod window;

// Re-export key extraction types for convenience
pub use config::ExtractionConfig;
pub use section::{ResultSet, SectionExtractor};
