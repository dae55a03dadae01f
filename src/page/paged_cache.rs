//! Windowed pagination over a fetched superset with reversible navigation
//!
//! The cache keeps three things: the full superset (read-only), a queue of
//! items not yet shown, and a stack of windows already shown. Paging forward
//! moves items from the queue into a new window; paging back returns the
//! current window's items to the front of the queue. Nothing is ever
//! refetched, created, or lost.

use std::collections::VecDeque;

/// Default number of items per window
pub const PAGE_SIZE: usize = 5;

/// Paging state for one subject's superset
#[derive(Debug, Clone)]
pub struct PagedCache<T> {
    page_size: usize,
    superset: Vec<T>,
    remainder: VecDeque<T>,
    history: Vec<Vec<T>>,
}

impl<T> Default for PagedCache<T> {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl<T: Clone> PagedCache<T> {
    /// Create an empty cache with the default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all state with a fresh superset and show its first window
    pub fn seed(&mut self, superset: Vec<T>) -> &[T] {
        self.remainder = superset.iter().cloned().collect();
        self.superset = superset;
        self.history.clear();

        let first = self.take_window();
        self.history.push(first);
        self.current()
    }

    /// Advance to the next window; saturates at the end
    pub fn next(&mut self) -> &[T] {
        if !self.remainder.is_empty() {
            let window = self.take_window();
            self.history.push(window);
        }
        self.current()
    }

    /// Return to the previous window; saturates at the first
    pub fn previous(&mut self) -> &[T] {
        if self.history.len() > 1 {
            if let Some(window) = self.history.pop() {
                for item in window.into_iter().rev() {
                    self.remainder.push_front(item);
                }
            }
        }
        self.current()
    }

    fn take_window(&mut self) -> Vec<T> {
        let count = self.page_size.min(self.remainder.len());
        self.remainder.drain(..count).collect()
    }
}

impl<T> PagedCache<T> {
    /// Create an empty cache with a custom page size (minimum 1)
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            superset: Vec::new(),
            remainder: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Drop all items and history
    pub fn clear(&mut self) {
        self.superset.clear();
        self.remainder.clear();
        self.history.clear();
    }

    /// The window currently displayed (empty before seeding)
    pub fn current(&self) -> &[T] {
        self.history.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `next` would show new items
    pub fn can_go_next(&self) -> bool {
        !self.remainder.is_empty()
    }

    /// Whether `previous` would go back
    pub fn can_go_previous(&self) -> bool {
        self.history.len() > 1
    }

    /// Full fetched result, in fetch order
    pub fn superset(&self) -> &[T] {
        &self.superset
    }

    /// Items not yet shown, in the order `next` would show them
    pub fn remainder(&self) -> impl Iterator<Item = &T> {
        self.remainder.iter()
    }

    /// Number of items not yet shown
    pub fn remainder_len(&self) -> usize {
        self.remainder.len()
    }

    /// Number of windows shown so far, including the current one
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 1-based number of the current window (0 before seeding)
    pub fn page_number(&self) -> usize {
        self.history.len()
    }

    /// Total number of windows the superset splits into (at least 1 once seeded)
    pub fn page_count(&self) -> usize {
        if self.history.is_empty() {
            0
        } else {
            self.superset.len().div_ceil(self.page_size).max(1)
        }
    }

    /// Whether nothing has been seeded or the superset was empty
    pub fn is_empty(&self) -> bool {
        self.superset.is_empty()
    }
}
