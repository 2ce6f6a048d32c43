//! Error types for the print library

use thiserror::Error;

/// Print error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// PDF assembly failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for print operations
pub type PrintResult<T> = Result<T, PrintError>;
