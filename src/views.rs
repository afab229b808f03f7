//! HTML views
//!
//! Templates are embedded at compile time and served by a shared minijinja
//! environment. Handlers render a view by name with any serializable context.

use axum::response::Html;
use minijinja::{AutoEscape, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

pub const BOOK_INDEX: &str = "books/index";
pub const BOOK_NEW: &str = "books/new";
pub const BOOK_EDIT: &str = "books/edit";
pub const BOOK_ERRORS: &str = "books/errors";
pub const ERROR: &str = "error";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.html")),
    (BOOK_INDEX, include_str!("../templates/books/index.html")),
    (BOOK_NEW, include_str!("../templates/books/new.html")),
    (BOOK_EDIT, include_str!("../templates/books/edit.html")),
    ("books/form", include_str!("../templates/books/form.html")),
    (BOOK_ERRORS, include_str!("../templates/books/errors.html")),
    (ERROR, include_str!("../templates/error.html")),
];

static VIEWS: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_loader(|name| {
        Ok(TEMPLATES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| source.to_string()))
    });
    env
});

/// Render the named view with the given data
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<Html<String>, minijinja::Error> {
    let html = VIEWS.get_template(name)?.render(ctx)?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_views_compile() {
        for (name, _) in TEMPLATES {
            VIEWS.get_template(name).unwrap();
        }
    }

    #[test]
    fn test_unknown_view_is_an_error() {
        assert!(render("books/missing", context! {}).is_err());
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render(
            BOOK_NEW,
            context! {
                book => context! { title => "<script>", author => "", genre => "", year => "" },
                title => "New Book",
                button => "Create New Book",
            },
        )
        .unwrap();
        assert!(html.0.contains("&lt;script&gt;"));
        assert!(!html.0.contains("<script>"));
    }
}
