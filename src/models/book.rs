//! Book model, submitted form and validation

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Publication year
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book form as submitted by the browser (create and update).
///
/// Every field is free text; missing keys decode as empty strings so a
/// partial submission still reaches validation instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(custom(function = "valid_title"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "valid_author"))]
    pub author: String,
    #[serde(default)]
    #[validate(custom(function = "valid_genre"))]
    pub genre: String,
    #[serde(default)]
    #[validate(custom(function = "valid_year"))]
    pub year: String,
}

/// Validated book values, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Unpersisted book shown in a form: either the stored record or the
/// values a user just submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookDraft {
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// PostgreSQL text columns cannot hold NUL characters
fn storable(label: &str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(field_error(
            "nul_character",
            format!("\"{}\" contains an invalid character", label),
        ));
    }
    Ok(())
}

fn required(label: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("blank", format!("\"{}\" is required", label)));
    }
    storable(label, value)
}

fn valid_title(value: &str) -> Result<(), ValidationError> {
    required("Title", value)
}

fn valid_author(value: &str) -> Result<(), ValidationError> {
    required("Author", value)
}

fn valid_genre(value: &str) -> Result<(), ValidationError> {
    storable("Genre", value)
}

fn valid_year(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<i32>().is_ok() {
        return Ok(());
    }
    Err(field_error(
        "not_a_number",
        "\"Year\" must be a whole number".to_string(),
    ))
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl BookForm {
    /// Field order used when reporting errors
    pub const FIELDS: [&'static str; 4] = ["title", "author", "genre", "year"];

    /// Validate the submission into typed values, or the ordered list of
    /// field errors.
    pub fn validate_into(&self) -> Result<NewBook, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            let by_field = errors.field_errors();
            let ordered = Self::FIELDS
                .iter()
                .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |err| FieldError {
                        field,
                        message: err
                            .message
                            .as_ref()
                            .map(Cow::to_string)
                            .unwrap_or_else(|| format!("\"{}\" is invalid", field)),
                    })
                })
                .collect();
            return Err(ordered);
        }

        Ok(NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: optional_text(&self.genre),
            year: optional_text(&self.year).and_then(|y| y.parse().ok()),
        })
    }

    /// Rebuild the submitted values as a draft, optionally pinned to an id
    pub fn to_draft(&self, id: Option<i32>) -> BookDraft {
        BookDraft {
            id,
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: self.year.clone(),
        }
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}
