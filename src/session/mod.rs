//! Browsing-session cache
//!
//! Recommendation supersets and author details are kept for the lifetime of
//! the session so revisiting a book never refetches.

pub mod storage;
pub mod store;

pub use storage::{MemoryStorage, SessionStorage};
pub use store::SessionCacheStore;
