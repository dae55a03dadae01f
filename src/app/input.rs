//! Key bindings for the book page

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Similar-books paging
    PreviousPage,
    NextPage,

    // Selection within the current window
    Up,
    Down,
    Open,
    Back,

    // Text fields
    ToggleDescription,
    ToggleAuthor,

    ToggleAllSimilar,
    Quit,
}

/// Map a key to an action (vim keys and arrows)
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PreviousPage),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Enter => Some(Action::Open),
        KeyCode::Backspace | KeyCode::Char('b') => Some(Action::Back),
        KeyCode::Char('d') => Some(Action::ToggleDescription),
        KeyCode::Char('a') => Some(Action::ToggleAuthor),
        KeyCode::Char('v') => Some(Action::ToggleAllSimilar),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (Ctrl-C always quits)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        }
    } else {
        key_to_action(key)
    }
}
