//! Media port — image uploads to an external host.

use std::future::Future;
use std::sync::Arc;

use places_domain::error::PlacesError;

/// An image received from a client, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name as sent by the client.
    pub file_name: String,
    /// MIME type, when the client declared one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Stores uploaded files and hands back public URLs.
pub trait MediaHost {
    /// Upload one image and return its public URL.
    fn upload(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<String, PlacesError>> + Send;
}

impl<T: MediaHost + Send + Sync> MediaHost for Arc<T> {
    fn upload(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<String, PlacesError>> + Send {
        (**self).upload(image)
    }
}
