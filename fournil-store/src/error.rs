//! Error types for the storage layer

use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error against the backing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while encoding state
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backup document is not usable
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    /// A migration run was requested while one is in flight
    #[error("Migration already in progress")]
    MigrationInFlight,
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
