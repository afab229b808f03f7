//! Book catalog service
//!
//! Each mutating operation validates the submitted form first and reports a
//! typed [`Submission`]: either the saved record, or the submitted values with
//! their field errors so the caller can show the form again. Store failures
//! stay on the `AppError` path.

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookForm, FieldError},
    repository::Repository,
};

/// Outcome of a create or update
#[derive(Debug)]
pub enum Submission {
    Saved(Book),
    Rejected(Rejection),
}

/// Submitted values that failed validation, with the reasons
#[derive(Debug)]
pub struct Rejection {
    pub book: BookDraft,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, most recently created first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .find(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Submission> {
        let data = match form.validate_into() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!("Rejected new book: {} field error(s)", errors.len());
                return Ok(Submission::Rejected(Rejection {
                    book: form.to_draft(None),
                    errors,
                }));
            }
        };

        let book = self.repository.books.create(&data).await?;
        tracing::info!("Created book id={} \"{}\"", book.id, book.title);
        Ok(Submission::Saved(book))
    }

    /// Update an existing book. Unknown ids are `NotFound` whether or not the
    /// submission is valid.
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Submission> {
        if self.repository.books.find(id).await?.is_none() {
            return Err(not_found(id));
        }

        let data = match form.validate_into() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!("Rejected update of book id={}: {} field error(s)", id, errors.len());
                return Ok(Submission::Rejected(Rejection {
                    book: form.to_draft(Some(id)),
                    errors,
                }));
            }
        };

        let book = self
            .repository
            .books
            .update(id, &data)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Updated book id={}", book.id);
        Ok(Submission::Saved(book))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Check that the store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
