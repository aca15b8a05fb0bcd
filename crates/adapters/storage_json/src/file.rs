//! JSON document setup, reads, and atomic writes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use places_domain::place::Place;

use crate::error::StorageError;

/// Configuration for the JSON file storage adapter.
pub struct Config {
    /// Location of the document (e.g. `places.json`).
    pub path: PathBuf,
    /// Write an empty array when the document does not exist yet.
    pub create_if_missing: bool,
}

impl Config {
    /// Build a [`JsonFile`] from this configuration.
    ///
    /// Creates the document (and its parent directories) when missing and
    /// `create_if_missing` is set.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document cannot be created.
    pub async fn build(self) -> Result<JsonFile, StorageError> {
        let file = JsonFile { path: self.path };
        if self.create_if_missing {
            file.initialize().await?;
        }
        Ok(file)
    }
}

/// Handle on the on-disk document.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Borrow the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;
        if exists {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tracing::info!(path = %self.path.display(), "creating empty places document");
        self.write(&[]).await
    }

    /// Read and parse the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] when the file is missing or unreadable
    /// and [`StorageError::Parse`] when it is not an array of places.
    pub async fn read(&self) -> Result<Vec<Place>, StorageError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the document with `places`.
    ///
    /// The new content goes to a sibling temporary file, is flushed to disk,
    /// and is then renamed over the document, so neither readers nor a crash
    /// ever see a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when either step fails.
    pub async fn write(&self, places: &[Place]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(places)?;
        let tmp = self.temporary_path();

        let staged = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await
        };
        staged.await.map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
