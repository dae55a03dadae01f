//! HTTP client for the book-tracker backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::CatalogError;
use super::fetcher::{AuthorFetcher, RecommendationFetcher};
use super::models::{
    AuthorResponse, ErrorResponse, SearchResponse, SimilarBooksRequest, SimilarBooksResponse,
};
use crate::book::{AuthorDetails, Book};

/// Backend API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl CatalogClient {
    /// Default backend location
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";

    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Search books by title, author or ISBN
    pub async fn search_books(&self, search: &str, limit: usize) -> Result<Vec<Book>, CatalogError> {
        let search = search.trim();
        if search.is_empty() {
            return Err(CatalogError::InvalidQuery("search must not be empty".to_string()));
        }

        let kind = if is_isbn(search) { "isbn" } else { "text" };
        tracing::debug!("Searching books ({}): {}", kind, search);

        let limit = limit.to_string();
        let response = self
            .client
            .get(self.endpoint("book"))
            .query(&[("search", search), ("limit", limit.as_str())])
            .send()
            .await?;

        let body: SearchResponse = read_json(response).await?;
        Ok(body.books)
    }
}

#[async_trait]
impl RecommendationFetcher for CatalogClient {
    /// Ranked by shared authors, categories and language
    async fn similar_books(&self, subject: &Book, limit: usize) -> Result<Vec<Book>, CatalogError> {
        let Some(request) = SimilarBooksRequest::for_book(subject, limit) else {
            tracing::debug!("Not enough metadata to rank books similar to {}", subject.title);
            return Ok(Vec::new());
        };

        let response =
            self.client.post(self.endpoint("similar-books")).json(&request).send().await?;

        let body: SimilarBooksResponse = read_json(response).await?;
        if let Some(message) = &body.message {
            tracing::debug!("Backend: {}", message);
        }
        Ok(body.similar_books)
    }
}

#[async_trait]
impl AuthorFetcher for CatalogClient {
    async fn author_details(&self, author: &str) -> Result<Option<AuthorDetails>, CatalogError> {
        if author.trim().is_empty() {
            return Err(CatalogError::InvalidQuery("author name must not be empty".to_string()));
        }

        let response = self
            .client
            .get(self.endpoint("author"))
            .query(&[("authorName", author)])
            .send()
            .await?;

        let body: AuthorResponse = read_json(response).await?;
        Ok(body.into_details())
    }
}

/// Decode a JSON body, turning non-2xx statuses into `ApiError`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(CatalogError::ApiError { status: status.as_u16(), message });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Whether a search looks like an ISBN-10 or ISBN-13
pub fn is_isbn(search: &str) -> bool {
    (search.len() == 10 || search.len() == 13) && search.bytes().all(|b| b.is_ascii_digit())
}
