//! Book catalog pages

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::book::{Book, BookDraft, BookForm, FieldError},
    services::books::Submission,
    views, AppState,
};

use super::{BookId, BookSubmission};

const BOOKS_PATH: &str = "/books";

#[derive(Serialize)]
struct IndexPage<'a> {
    books: &'a [Book],
}

#[derive(Serialize)]
struct FormPage<'a> {
    book: &'a BookDraft,
    title: &'static str,
    button: &'static str,
    errors: &'a [FieldError],
}

/// The two book forms share fields but differ in view and labels
#[derive(Debug, Clone, Copy)]
enum BookFormView {
    New,
    Edit,
}

impl BookFormView {
    fn render(self, book: &BookDraft, errors: &[FieldError]) -> AppResult<Html<String>> {
        let (view, title, button) = match self {
            BookFormView::New => (views::BOOK_NEW, "New Book", "Create New Book"),
            BookFormView::Edit => (views::BOOK_EDIT, "Update Book", "Update Book"),
        };
        let page = FormPage {
            book,
            title,
            button,
            errors,
        };
        Ok(views::render(view, page)?)
    }

    /// Redirect to the list once saved, otherwise show the form again with
    /// what the user typed and what was wrong with it.
    fn respond(self, outcome: Submission) -> AppResult<Response> {
        match outcome {
            Submission::Saved(_) => Ok(Redirect::to(BOOKS_PATH).into_response()),
            Submission::Rejected(rejection) => {
                let page = self.render(&rejection.book, &rejection.errors)?;
                Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
            }
        }
    }
}

/// Home page redirects to the book list
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    responses(
        (status = 303, description = "Redirect to /books")
    )
)]
pub async fn home() -> Redirect {
    Redirect::to(BOOKS_PATH)
}

/// List all books, newest first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list page", content_type = "text/html", body = String)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    Ok(views::render(views::BOOK_INDEX, IndexPage { books: &books })?)
}

/// Empty create form
#[utoipa::path(
    get,
    path = "/books/new",
    tag = "books",
    responses(
        (status = 200, description = "Create form", content_type = "text/html", body = String)
    )
)]
pub async fn new_book() -> AppResult<Html<String>> {
    BookFormView::New.render(&BookDraft::default(), &[])
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books/new",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirect to /books"),
        (status = 400, description = "Unreadable form body", content_type = "text/html", body = String),
        (status = 422, description = "Create form with validation errors", content_type = "text/html", body = String)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    BookSubmission(form): BookSubmission,
) -> AppResult<Response> {
    let outcome = state.services.books.create(&form).await?;
    BookFormView::New.respond(outcome)
}

/// Edit form for one book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Edit form", content_type = "text/html", body = String),
        (status = 404, description = "Book not found", content_type = "text/html", body = String)
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Html<String>> {
    let book = state.services.books.get(id).await?;
    BookFormView::Edit.render(&BookDraft::from(&book), &[])
}

/// Update a book
#[utoipa::path(
    post,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book updated, redirect to /books"),
        (status = 400, description = "Unreadable form body", content_type = "text/html", body = String),
        (status = 404, description = "Book not found", content_type = "text/html", body = String),
        (status = 422, description = "Edit form with validation errors", content_type = "text/html", body = String)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    BookSubmission(form): BookSubmission,
) -> AppResult<Response> {
    let outcome = state.services.books.update(id, &form).await?;
    BookFormView::Edit.respond(outcome)
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/books/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, redirect to /books"),
        (status = 404, description = "Book not found", content_type = "text/html", body = String)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Redirect> {
    state.services.books.delete(id).await?;
    Ok(Redirect::to(BOOKS_PATH))
}
