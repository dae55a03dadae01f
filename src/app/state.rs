//! Application state definitions

use crate::book::Book;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Book details with the similar-books rail
    #[default]
    BookPage,
    /// Every similar book for the current subject
    AllSimilar,
}

/// Status line at the bottom of the screen
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display, if any
    pub message: Option<String>,
}

impl StatusLine {
    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Selected book within the current window of similar books
    pub selected: usize,

    /// Scroll offset on the all-similar screen
    pub all_scroll: usize,

    /// Books visited before the current one, most recent last
    pub back_stack: Vec<Book>,

    /// Status line state
    pub status: StatusLine,
}

impl AppState {
    /// Move the selection down within a window of `len` books
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move the selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a window of `len` books
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Scroll the all-similar list by `delta` rows within `len` entries
    pub fn scroll_all(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(1);
        self.all_scroll = self.all_scroll.saturating_add_signed(delta).min(max);
    }

    /// Remember `book` as the page to return to
    pub fn push_back(&mut self, book: Book) {
        if self.back_stack.last() != Some(&book) {
            self.back_stack.push(book);
        }
    }

    /// Reset per-subject view state after the subject changes
    pub fn on_subject_changed(&mut self) {
        self.selected = 0;
        self.all_scroll = 0;
        self.screen = Screen::BookPage;
    }
}
