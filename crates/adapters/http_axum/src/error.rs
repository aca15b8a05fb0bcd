//! HTTP error response mapping.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use places_domain::error::{FieldError, PlacesError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

/// Maps [`PlacesError`] and extractor rejections to HTTP responses.
pub enum ApiError {
    /// An error raised by the application or domain layer.
    Domain(PlacesError),
    /// The request was refused before reaching the service (bad multipart
    /// stream, unreadable JSON, body too large, …).
    Rejected { status: StatusCode, message: String },
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(err: MultipartRejection) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            Self::Domain(PlacesError::Validation(err)) => {
                tracing::warn!(error = %err, "request rejected");
                let fields = err.field_errors().to_vec();
                (StatusCode::BAD_REQUEST, err.to_string(), fields)
            }
            Self::Domain(PlacesError::NotFound(err)) => {
                (StatusCode::NOT_FOUND, err.to_string(), Vec::new())
            }
            Self::Domain(PlacesError::Storage(err)) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
            Self::Domain(PlacesError::Media(err)) => {
                tracing::error!(error = ?err, "media host error");
                (
                    StatusCode::BAD_GATEWAY,
                    "image upload failed".to_string(),
                    Vec::new(),
                )
            }
            Self::Rejected { status, message } => (status, message, Vec::new()),
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                fields,
            }),
        )
            .into_response()
    }
}
