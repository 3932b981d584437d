//! Error types and error handling for griot.
//!
//! This module defines the error taxonomy used throughout the
//! application. CLI-specific presentation (exit codes, coloring)
//! is handled in the `cli` module.

use thiserror::Error;

/// Result type alias for griot operations
pub type Result<T> = std::result::Result<T, GriotError>;

/// Main error type for the griot pipeline and agent
#[derive(Error, Debug)]
pub enum GriotError {
    /// All branch candidates failed during archive download
    #[error("Failed to download repository from branches {branches:?}. Last error: {last_error}")]
    FetchFailed {
        branches: Vec<String>,
        last_error: String,
    },

    /// Chunking was configured with a zero size or step
    #[error("Invalid chunking parameters: {0}")]
    InvalidChunking(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Front matter of a processed file could not be parsed.
    /// This aborts the whole extraction pass.
    #[error("Failed to parse {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Agent run failed: {0}")]
    AgentFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GriotError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a caller configuration error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            GriotError::InvalidChunking(_)
                | GriotError::InvalidQuery(_)
                | GriotError::ConfigError(_)
        )
    }

    /// Check if this error is fatal to an ingestion run
    pub fn is_ingestion_fatal(&self) -> bool {
        matches!(
            self,
            GriotError::FetchFailed { .. }
                | GriotError::InvalidChunking(_)
                | GriotError::ExtractionFailed(_)
                | GriotError::ParseFailed { .. }
                | GriotError::IndexingFailed(_)
        )
    }
}
