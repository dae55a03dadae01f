//! Booktracker - a terminal book page with paged recommendations
//!
//! Shows one book's details, a truncated description and author bio, and a
//! rail of similar books paged five at a time with a back history. Results
//! are cached per session so revisiting a book does not refetch.

pub mod app;
pub mod book;
pub mod catalog;
pub mod config;
pub mod page;
pub mod session;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
