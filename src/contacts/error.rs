//! Contact storage-specific error types.

/// Errors that can occur during contact storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Storage service returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Create succeeded but the Location header was absent or not numeric
    #[error("Missing or invalid Location header: {0:?}")]
    MissingLocation(Option<String>),

    /// Failed to deserialize response or notification
    #[error("Failed to deserialize response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),
}

impl StorageError {
    /// Return the HTTP status code if the service rejected the request.
    ///
    pub fn status(&self) -> Option<u16> {
        match self {
            StorageError::Status { status, .. } => Some(*status),
            StorageError::HttpRequest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
