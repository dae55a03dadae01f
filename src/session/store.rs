//! Typed session cache for similar-book supersets and author details
//!
//! Entries are JSON encoded in the underlying storage. There is no eviction:
//! entries last until the session ends.
//!
//! The lookup and the write around a fetch are not atomic. Two first visits
//! to the same book that overlap will both fetch, and the later write wins.

use serde::{Serialize, de::DeserializeOwned};

use super::storage::{MemoryStorage, SessionStorage};
use crate::book::{AuthorDetails, Book, SubjectKey};

/// Session cache keyed by subject and author
pub struct SessionCacheStore {
    storage: Box<dyn SessionStorage>,
}

impl Default for SessionCacheStore {
    fn default() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl std::fmt::Debug for SessionCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCacheStore").finish_non_exhaustive()
    }
}

impl SessionCacheStore {
    /// Wrap a storage backend
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self { storage: Box::new(storage) }
    }

    /// Storage key for a subject's similar books
    pub fn similar_books_key(subject: &SubjectKey) -> String {
        format!("{}-similar-books", subject)
    }

    /// Storage key for an author's details
    pub fn author_key(author: &str) -> String {
        format!("author-{}", author)
    }

    /// Previously fetched superset for a subject
    pub fn similar_books(&self, subject: &SubjectKey) -> Option<Vec<Book>> {
        self.read(&Self::similar_books_key(subject))
    }

    /// Remember a subject's superset
    pub fn put_similar_books(&mut self, subject: &SubjectKey, books: &[Book]) {
        self.write(&Self::similar_books_key(subject), books);
    }

    /// Previously fetched details for an author
    pub fn author_details(&self, author: &str) -> Option<AuthorDetails> {
        self.read(&Self::author_key(author))
    }

    /// Remember an author's details
    pub fn put_author_details(&mut self, author: &str, details: &AuthorDetails) {
        self.write(&Self::author_key(author), details);
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session entry {}: {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.set(key, json),
            Err(e) => tracing::warn!("Failed to encode session entry {}: {}", key, e),
        }
    }
}
