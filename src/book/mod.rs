//! Book records

pub mod model;

pub use model::{AuthorDetails, Book, SubjectKey};
