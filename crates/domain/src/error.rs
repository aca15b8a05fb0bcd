//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PlacesError`]
//! via `From`, so the HTTP adapter only ever maps one enum to status codes.

use serde::Serialize;

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("media host error")]
    Media(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A single rule violation reported against one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field (e.g. `address.city`).
    pub field: String,
    /// Human readable message.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input rejected before any state was touched.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// One or more field rules failed. Never empty.
    #[error("request body failed validation ({} field error(s))", .0.len())]
    Fields(Vec<FieldError>),

    /// The request could not even be read as a place payload.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MalformedPayload`].
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    /// Field-level errors, empty for malformed payloads.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Fields(errors) => errors,
            Self::MalformedPayload { .. } => &[],
        }
    }
}

/// Lookup of a record that does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
