//! Sentence-bounded preview of a long text with a show more / show less toggle

use once_cell::sync::Lazy;
use regex::Regex;

/// Default number of sentences shown while collapsed
pub const PREVIEW_SENTENCES: usize = 5;

/// Sentence-ending punctuation followed by whitespace
static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?]+)\s+").expect("sentence regex is valid"));

/// Which toggle the presentation layer should offer for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleControl {
    /// Text is truncated; offer "Show more"
    ShowMore,
    /// Text is expanded past its preview; offer "Show less"
    ShowLess,
    /// Text fits in its preview
    None,
}

/// Truncation state for one text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWindow {
    full: String,
    shown: String,
    expanded: bool,
    preview_sentences: usize,
}

impl Default for TextWindow {
    fn default() -> Self {
        Self::new(PREVIEW_SENTENCES)
    }
}

impl TextWindow {
    /// Create an empty window previewing `preview_sentences` sentences
    pub fn new(preview_sentences: usize) -> Self {
        Self {
            full: String::new(),
            shown: String::new(),
            expanded: false,
            preview_sentences: preview_sentences.max(1),
        }
    }

    /// Store the complete text and show its preview
    pub fn set_full(&mut self, text: impl Into<String>) {
        self.full = text.into();
        self.shown = preview(&self.full, self.preview_sentences);
        self.expanded = false;
    }

    /// Show the complete text
    pub fn expand(&mut self) {
        if self.expanded {
            return;
        }
        self.shown.clone_from(&self.full);
        self.expanded = true;
    }

    /// Return to the preview, always derived from the stored full text
    pub fn collapse(&mut self) {
        self.shown = preview(&self.full, self.preview_sentences);
        self.expanded = false;
    }

    /// Flip between preview and full text
    pub fn toggle(&mut self) {
        match self.control() {
            ToggleControl::ShowMore => self.expand(),
            ToggleControl::ShowLess => self.collapse(),
            ToggleControl::None => {}
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        self.full.clear();
        self.shown.clear();
        self.expanded = false;
    }

    /// The complete text
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The text currently displayed
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Whether the full text is displayed by user request
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether there is no text at all
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Whether part of the text is hidden
    pub fn needs_toggle(&self) -> bool {
        self.shown.len() < self.full.len()
    }

    /// Whether the full text is longer than its preview
    pub fn is_truncatable(&self) -> bool {
        preview(&self.full, self.preview_sentences).len() < self.full.len()
    }

    /// Control to render next to the text
    pub fn control(&self) -> ToggleControl {
        if self.needs_toggle() {
            ToggleControl::ShowMore
        } else if self.expanded && self.is_truncatable() {
            ToggleControl::ShowLess
        } else {
            ToggleControl::None
        }
    }
}

/// Split text into sentences, keeping terminal punctuation
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for caps in SENTENCE_END_RE.captures_iter(text) {
        let (Some(whole), Some(punct)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let sentence = text[start..punct.end()].trim();
        if !sentence.is_empty() {
            out.push(sentence);
        }
        start = whole.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// First `limit` sentences joined by single spaces, or the text itself when it is short enough
pub fn preview(text: &str, limit: usize) -> String {
    let parts = sentences(text);
    if parts.len() <= limit {
        return text.to_string();
    }
    parts[..limit].join(" ")
}
