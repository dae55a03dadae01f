//! UI rendering components

pub mod all_similar;
pub mod book_page;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{AppState, Screen};
use crate::page::PageView;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, view: &PageView<'_>, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match state.screen {
        Screen::BookPage => book_page::draw(frame, chunks[0], state, view, theme),
        Screen::AllSimilar => all_similar::draw(frame, chunks[0], state, view, theme),
    }

    status_line::draw(frame, chunks[1], state, theme);
}
