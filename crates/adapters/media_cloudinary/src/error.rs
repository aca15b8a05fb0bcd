//! Media adapter error types.

use places_domain::error::PlacesError;

/// Errors specific to the Cloudinary adapter.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Cloud name, API key or API secret is missing.
    #[error("media host credentials are not configured")]
    NotConfigured,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The upload request failed before a response was read.
    #[error("upload request failed")]
    Request(#[from] reqwest::Error),

    /// Cloudinary answered with a non-success status.
    #[error("media host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<MediaError> for PlacesError {
    fn from(err: MediaError) -> Self {
        Self::Media(Box::new(err))
    }
}
