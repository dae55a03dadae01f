//! Wire formats for the book-tracker backend

use serde::{Deserialize, Serialize};

use crate::book::{AuthorDetails, Book};

/// Body of `GET /book`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Body of `POST /similar-books`
#[derive(Debug, Clone, Serialize)]
pub struct SimilarBooksRequest<'a> {
    pub authors: &'a [String],
    pub categories: &'a [String],
    pub language: &'a str,
    pub limit: usize,
}

impl<'a> SimilarBooksRequest<'a> {
    /// Build a query from a book's authors, categories and language
    ///
    /// Returns `None` when any of them is missing; the backend rejects such
    /// queries outright.
    pub fn for_book(book: &'a Book, limit: usize) -> Option<Self> {
        if book.authors.is_empty() || book.categories.is_empty() || book.language.is_empty() {
            return None;
        }
        Some(Self {
            authors: &book.authors,
            categories: &book.categories,
            language: &book.language,
            limit,
        })
    }
}

/// Response of `POST /similar-books`
///
/// The backend answers `{"similarBooks": [...]}` on a hit and
/// `{"message": "..."}` when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarBooksResponse {
    #[serde(rename = "similarBooks", default)]
    pub similar_books: Vec<Book>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /author`
///
/// Either details or a `message` explaining that nothing was found.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorResponse {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthorResponse {
    /// Convert to details, or `None` when the backend found nothing
    pub fn into_details(self) -> Option<AuthorDetails> {
        let details = AuthorDetails {
            description: self.description.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
        };
        if details.is_empty() { None } else { Some(details) }
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similar_books_hit() {
        let json = r#"{"similarBooks":[{"id":"a","title":"A"},{"id":"b","title":"B"}]}"#;
        let response: SimilarBooksResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.similar_books.len(), 2);
        assert!(response.message.is_none());
    }

    #[test]
    fn similar_books_message_means_empty() {
        let json = r#"{"message":"Could not find any similar books with query: x"}"#;
        let response: SimilarBooksResponse = serde_json::from_str(json).unwrap();
        assert!(response.similar_books.is_empty());
    }

    #[test]
    fn author_message_means_absent() {
        let json = r#"{"message":"No details found for the author Nobody."}"#;
        let response: AuthorResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_details().is_none());
    }

    #[test]
    fn author_details_present() {
        let json = r#"{"description":"Bio.","image_url":"http://img"}"#;
        let response: AuthorResponse = serde_json::from_str(json).unwrap();
        let details = response.into_details().unwrap();
        assert_eq!(details.description, "Bio.");
        assert_eq!(details.image_url, "http://img");
    }

    #[test]
    fn similar_request_requires_full_query() {
        let book = Book::new("1", "Dune").with_authors(["Frank Herbert"]);
        assert!(SimilarBooksRequest::for_book(&book, 20).is_none());

        let book = book.with_categories(["Fiction"]).with_language("en");
        let request = SimilarBooksRequest::for_book(&book, 20).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["limit"], 20);
        assert_eq!(json["authors"][0], "Frank Herbert");
        assert_eq!(json["language"], "en");
    }

    #[test]
    fn search_response_parses() {
        let json = r#"{"books":[{"id":"x","title":"Y","authors":["Z"]}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.books[0].authors, vec!["Z".to_string()]);
    }
}
