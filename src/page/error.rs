//! Error states surfaced to the book page

use thiserror::Error;

use crate::catalog::CatalogError;

/// Why a section of the page has no data
///
/// An empty recommendation list is not an error; see
/// [`PageView::similar_books_empty`](super::PageView::similar_books_empty).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The book or author does not exist
    #[error("{what} not found")]
    NotFound {
        /// What was missing ("Book", "Author")
        what: String,
    },

    /// Network or decode failure; the user has to reload to retry
    #[error("{message}. Please refresh to try again.")]
    FetchFailed {
        /// Human-readable description of the failure
        message: String,
    },
}

impl PageError {
    /// Shorthand for a `NotFound` error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Wrap a backend error with what was being fetched
    pub fn fetch_failed(what: &str, err: &CatalogError) -> Self {
        Self::FetchFailed { message: format!("Failed to fetch {}: {}", what, err) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_naturally() {
        assert_eq!(PageError::not_found("Book").to_string(), "Book not found");
        let err = CatalogError::ApiError { status: 502, message: "upstream down".into() };
        let err = PageError::fetch_failed("similar books", &err);
        assert_eq!(
            err.to_string(),
            "Failed to fetch similar books: API error (502): upstream down. Please refresh to try again."
        );
    }
}
