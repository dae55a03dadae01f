//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::book::Book;
use crate::page::{Intent, PageSession, TextField};
use crate::theme::Theme;
use crate::ui;
use input::Action;
use state::{AppState, Screen};

/// The main application
pub struct App {
    /// Book page and its fetchers
    page: PageSession,

    /// Current application state
    state: AppState,

    /// Color palette
    theme: Theme,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(page: PageSession) -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self { page, state: AppState::default(), theme: Theme::default(), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop, starting on `book`
    pub async fn run(&mut self, book: Option<Book>) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.page.select_subject(book);

        loop {
            self.page.apply_ready_completions();

            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &self.page.view(), &self.theme);
            })?;

            // Handle events
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = input::key_with_modifier_to_action(key.code, key.modifiers);
                        if let Some(action) = action {
                            if dispatch(&mut self.state, &mut self.page, action) {
                                break;
                            }
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Apply an action to the page, returns true if should exit
pub fn dispatch(state: &mut AppState, page: &mut PageSession, action: Action) -> bool {
    if action == Action::Quit {
        return true;
    }

    match state.screen {
        Screen::BookPage => dispatch_book_page(state, page, action),
        Screen::AllSimilar => dispatch_all_similar(state, page, action),
    }
    false
}

fn dispatch_book_page(state: &mut AppState, page: &mut PageSession, action: Action) {
    match action {
        Action::PreviousPage => {
            page.handle(Intent::NavigatePrevious);
            state.clamp_selection(page.view().window.len());
        }
        Action::NextPage => {
            page.handle(Intent::NavigateNext);
            state.clamp_selection(page.view().window.len());
        }
        Action::Up => state.select_previous(),
        Action::Down => state.select_next(page.view().window.len()),
        Action::Open => {
            let view = page.view();
            let target = view.window.get(state.selected).cloned();
            let current = view.subject.cloned();
            if let Some(book) = target {
                open_book(state, page, book, current);
            }
        }
        Action::Back => go_back(state, page),
        Action::ToggleDescription => page.handle(Intent::Toggle(TextField::BookDescription)),
        Action::ToggleAuthor => page.handle(Intent::Toggle(TextField::AuthorBio)),
        Action::ToggleAllSimilar => {
            if page.view().all_similar.is_empty() {
                state.status.set_message("No similar books to list");
            } else {
                state.screen = Screen::AllSimilar;
                state.all_scroll = 0;
            }
        }
        Action::Quit => {}
    }
}

fn dispatch_all_similar(state: &mut AppState, page: &mut PageSession, action: Action) {
    let len = page.view().all_similar.len();
    match action {
        Action::Up | Action::PreviousPage => state.scroll_all(-1, len),
        Action::Down | Action::NextPage => state.scroll_all(1, len),
        Action::Open => {
            let view = page.view();
            let target = view.all_similar.get(state.all_scroll).cloned();
            let current = view.subject.cloned();
            if let Some(book) = target {
                open_book(state, page, book, current);
            }
        }
        Action::Back | Action::ToggleAllSimilar => state.screen = Screen::BookPage,
        Action::ToggleDescription | Action::ToggleAuthor | Action::Quit => {}
    }
}

fn open_book(state: &mut AppState, page: &mut PageSession, book: Book, current: Option<Book>) {
    if let Some(current) = current {
        state.push_back(current);
    }
    state.status.clear();
    page.select_subject(Some(book));
    state.on_subject_changed();
}

fn go_back(state: &mut AppState, page: &mut PageSession) {
    match state.back_stack.pop() {
        Some(book) => {
            state.status.clear();
            page.select_subject(Some(book));
            state.on_subject_changed();
        }
        None => state.status.set_message("No previous book"),
    }
}
