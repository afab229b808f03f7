//! Error types for Folio server
//!
//! `AppError` is the single place where a failed request turns into an HTTP
//! response: every handler returns [`AppResult`], and panics caught by the
//! router's panic layer are funnelled here too.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::views;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Data handed to the generic `error` view
#[derive(Serialize)]
struct ErrorPage {
    status: u16,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let rendered = match &self {
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                views::render(views::BOOK_ERRORS, minijinja::context! {})
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                views::render(
                    views::ERROR,
                    ErrorPage {
                        status: status.as_u16(),
                        message: msg.clone(),
                    },
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                server_error_page(status)
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:#}", e);
                server_error_page(status)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                server_error_page(status)
            }
        };

        match rendered {
            Ok(page) => (status, page).into_response(),
            Err(e) => {
                // The error views themselves failed; fall back to plain text
                tracing::error!("Failed to render error view: {:#}", e);
                (status, status.canonical_reason().unwrap_or("Error")).into_response()
            }
        }
    }
}

fn server_error_page(status: StatusCode) -> Result<Html<String>, minijinja::Error> {
    views::render(
        views::ERROR,
        ErrorPage {
            status: status.as_u16(),
            message: "Something went wrong on our side. Please try again.".to_string(),
        },
    )
}

/// Turn a panic payload caught by `CatchPanicLayer` into an error response
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
