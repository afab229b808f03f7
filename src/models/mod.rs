//! Data models for Folio

pub mod book;

pub use book::{Book, BookDraft, BookForm, FieldError, NewBook};
