//! Storage-specific error type wrapping I/O and JSON errors.

use std::path::PathBuf;

use places_domain::error::PlacesError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The document could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document (or its temporary sibling) could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON array of places.
    #[error("malformed document {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Places could not be serialized.
    #[error("failed to encode places")]
    Encode(#[from] serde_json::Error),
}

impl From<StorageError> for PlacesError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
