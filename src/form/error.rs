//! Form error types.

use thiserror::Error;

use super::NodePath;

/// Errors raised while reading, rebuilding or editing a form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("cannot read classes of form element: {0}")]
    ClassAccess(String),

    #[error("invalid date value `{0}`")]
    InvalidDate(String),

    /// A container was closed at root depth, or never closed.
    #[error("unbalanced form structure at `{path}`")]
    Unbalanced { path: String },

    #[error("form HTML could not be parsed: {0}")]
    Html(String),

    #[error("no form element at `{0}`")]
    InvalidPath(NodePath),

    #[error("`{label}` does not allow {action}")]
    Refused { label: String, action: &'static str },
}
