//! Repository layer for database operations

pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Persistence operations over book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, newest first
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn find(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    /// Overwrite an existing book. `None` when no row has this id.
    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Option<Book>>;

    /// Returns false when no row has this id
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Round-trip to the database, used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the record stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_books(Arc::new(books::BooksRepository::new(pool)))
    }

    /// Build a repository around an existing book store
    pub fn with_books(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
