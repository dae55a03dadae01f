//! Error types for the book-tracker backend

use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Query rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl CatalogError {
    /// Check if the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::ApiError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        assert!(CatalogError::ApiError { status: 404, message: String::new() }.is_not_found());
        assert!(!CatalogError::ApiError { status: 500, message: String::new() }.is_not_found());
        assert!(!CatalogError::InvalidQuery("empty".into()).is_not_found());
    }

    #[test]
    fn display_includes_status() {
        let err = CatalogError::ApiError { status: 400, message: "missing search".into() };
        assert_eq!(err.to_string(), "API error (400): missing search");
    }
}
