//! Fetch collaborators consumed by the book page

use async_trait::async_trait;

use super::error::CatalogError;
use crate::book::{AuthorDetails, Book};

/// Source of ranked "similar books" for a subject
///
/// An empty vector means nothing similar was found; that is a valid result,
/// distinct from an error.
#[async_trait]
pub trait RecommendationFetcher: Send + Sync {
    async fn similar_books(&self, subject: &Book, limit: usize) -> Result<Vec<Book>, CatalogError>;
}

/// Source of author biographies and portraits
#[async_trait]
pub trait AuthorFetcher: Send + Sync {
    /// `Ok(None)` when the author could not be found
    async fn author_details(&self, author: &str) -> Result<Option<AuthorDetails>, CatalogError>;
}
