//! Book-tracker backend integration
//!
//! Provides the fetch collaborators the book page depends on and an HTTP
//! client implementing them.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod models;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use fetcher::{AuthorFetcher, RecommendationFetcher};
