//! Error types for the geonoise ledger.
//!
//! Building and reading a measurement never fails. Errors only come
//! from the storage side: file I/O, JSON and rows that cannot be turned
//! back into a valid record.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for geonoise operations.
pub type Result<T> = std::result::Result<T, GeonoiseError>;

/// Errors that can occur while storing or loading noise records.
#[derive(Error, Debug)]
pub enum GeonoiseError {
    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("Invalid decimal coordinate: {value}")]
    InvalidDecimal { value: String },

    // Reconstruction Errors
    #[error("Stored row {id:?} has no measurement unit")]
    MissingUnit { id: Option<u64> },

    #[error("Stored row {id:?} is inconsistent: {reason}")]
    InconsistentRow { id: Option<u64>, reason: String },

    // Ledger Errors
    #[error("Record already has identity {existing}")]
    IdentityAlreadyAssigned { existing: u64 },

    #[error("Ledger is full: {max_records} records")]
    LedgerFull { max_records: usize },

    #[error("Record not found: {id}")]
    RecordNotFound { id: u64 },
}

impl GeonoiseError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            GeonoiseError::FileReadError { .. } => "FILE_READ_ERROR",
            GeonoiseError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            GeonoiseError::DirectoryCreateError { .. } => "DIRECTORY_CREATE_ERROR",
            GeonoiseError::JsonSerializationError(_) => "SERIALIZATION_ERROR",
            GeonoiseError::InvalidDecimal { .. } => "INVALID_DECIMAL",
            GeonoiseError::MissingUnit { .. } => "MISSING_UNIT",
            GeonoiseError::InconsistentRow { .. } => "INCONSISTENT_ROW",
            GeonoiseError::IdentityAlreadyAssigned { .. } => "IDENTITY_ALREADY_ASSIGNED",
            GeonoiseError::LedgerFull { .. } => "LEDGER_FULL",
            GeonoiseError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
        }
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            GeonoiseError::FileReadError { .. } => Some("Check the ledger path and try again."),
            GeonoiseError::InvalidDecimal { .. } => {
                Some("Coordinates must be plain decimals such as 38.7 or -9.1.")
            }
            GeonoiseError::MissingUnit { .. } | GeonoiseError::InconsistentRow { .. } => {
                Some("The ledger file was edited or corrupted; restore it from a backup.")
            }
            GeonoiseError::LedgerFull { .. } => {
                Some("Raise max_records in the config or start a new ledger file.")
            }
            GeonoiseError::RecordNotFound { .. } => Some("Use 'list' to see stored record ids."),
            _ => None,
        }
    }
}
