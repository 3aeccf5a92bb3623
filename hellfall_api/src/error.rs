//! Error types for hellfall_api

use thiserror::Error;

/// Unified error type for loading, indexing and searching
#[derive(Debug, Error)]
pub enum ApiError {
    /// The card export could not be read or decoded
    #[error("Data error: {0}")]
    Data(#[from] hellfall_common::Error),
    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Search index operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Failed to read or write normalized card JSON
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The index connection is unusable after a panic in another request
    #[error("Search index unavailable: {0}")]
    IndexUnavailable(String),
}

/// Result alias for hellfall_api operations
pub type Result<T> = std::result::Result<T, ApiError>;
