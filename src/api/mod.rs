//! HTTP handlers and routing for Folio

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, Uri},
    routing::{get, post},
    Form, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{handle_panic, AppError},
    models::book::BookForm,
    AppState,
};

/// Book identifier taken from the `:id` path segment.
///
/// A segment that is not a number cannot name a book, so it is rejected as
/// not found rather than as a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.parse::<i32>()
            .map(BookId)
            .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
    }
}

/// Url-encoded book form body. An unreadable body (wrong content type,
/// duplicate keys, bad encoding) is a bad request, not a validation failure.
#[derive(Debug, Clone)]
pub struct BookSubmission(pub BookForm);

#[async_trait]
impl<S> FromRequest<S> for BookSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = Form::<BookForm>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(BookSubmission(form))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/", get(books::home))
        .route("/books", get(books::list_books))
        .route("/books/", get(books::list_books))
        .route("/books/new", get(books::new_book).post(books::create_book))
        .route("/books/:id", get(books::edit_book).post(books::update_book))
        .route("/books/:id/delete", post(books::delete_book))
        .with_state(state);

    Router::new()
        .merge(app)
        .merge(openapi::create_openapi_router())
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
