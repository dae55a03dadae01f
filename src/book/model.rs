//! Book records shared by the catalog client and the book page
//!
//! A `Book` is an opaque recommendation record as far as the page is
//! concerned: only its `id` takes part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A book as returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Book {
    /// Stable identifier (Google Books volume id)
    pub id: String,
    /// Display title
    pub title: String,
    /// Author names, primary author first
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publisher name
    #[serde(default)]
    pub publisher: String,
    /// Human-readable publication date, when the backend could parse one
    #[serde(rename = "publishedDate", default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// Full description text
    #[serde(default)]
    pub description: String,
    /// Page count (0 when unknown)
    #[serde(rename = "pageCount", default)]
    pub page_count: u32,
    /// Categories / genres
    #[serde(default)]
    pub categories: Vec<String>,
    /// Cover thumbnail URL
    #[serde(default)]
    pub image_url: String,
    /// Language code (e.g., "en")
    #[serde(default)]
    pub language: String,
}

impl Book {
    /// Create a book with just an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), ..Default::default() }
    }

    /// Builder-style author setter
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style category setter
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style language setter
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The first listed author, if any
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str).filter(|a| !a.trim().is_empty())
    }

    /// Key partitioning all page and session state for this book
    pub fn subject_key(&self) -> SubjectKey {
        SubjectKey::from(self)
    }

    /// Display name for the language code
    pub fn language_name(&self) -> &str {
        match self.language.as_str() {
            "en" => "English",
            other => other,
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Author details shown in the "About the author" section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDetails {
    /// Biography text (may be long)
    #[serde(default)]
    pub description: String,
    /// Portrait URL, empty when none was found
    #[serde(default)]
    pub image_url: String,
}

impl AuthorDetails {
    /// Whether the backend returned anything worth showing
    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty() && self.image_url.trim().is_empty()
    }
}

/// Identity of the book currently being viewed
///
/// Derived from the title, which is also how the session store names
/// similar-book entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey(String);

impl SubjectKey {
    /// Create a key from any string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Book> for SubjectKey {
    fn from(book: &Book) -> Self {
        let title = book.title.trim();
        if title.is_empty() { Self(book.id.clone()) } else { Self(title.to_string()) }
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
