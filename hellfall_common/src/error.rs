//! Error types for hellfall_common

use thiserror::Error;

/// Errors raised while reading an ingestion document.
///
/// Normalization and query compilation never fail; only decoding the
/// source document can.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The source document is not valid JSON or lacks a `data` array
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for hellfall_common operations
pub type Result<T> = std::result::Result<T, Error>;
