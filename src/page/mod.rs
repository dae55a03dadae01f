//! The book page: similar-books pager, truncated text fields and their orchestration

pub mod controller;
pub mod driver;
pub mod error;
pub mod paged_cache;
pub mod text_window;

pub use controller::{
    FetchCompletion, FetchOutcome, FetchRequest, Intent, LoadState, PageController, PageSettings,
    PageView, TextField, Ticket,
};
pub use driver::PageSession;
pub use error::PageError;
pub use paged_cache::{PAGE_SIZE, PagedCache};
pub use text_window::{TextWindow, ToggleControl};
