//! Error types for price data ingestion.

use std::path::PathBuf;

use price_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading or writing price data files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input extension is not one we know how to read.
    #[error("unsupported input format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Failed to parse JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize JSON.
    #[error("failed to serialize {what}: {source}")]
    JsonWrite {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration parsed but holds an out-of-range value.
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    // === Model Errors ===
    /// Loaded data violates a line item invariant.
    #[error("invalid data in {path}: {source}")]
    InvalidData {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
