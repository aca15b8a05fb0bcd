//! Cloudinary media host configuration.

use serde::Deserialize;

/// Configuration for the Cloudinary media host.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudinaryConfig {
    /// Cloudinary account (cloud) name.
    pub cloud_name: String,
    /// API key sent with every upload.
    pub api_key: String,
    /// API secret used to sign uploads. Never sent over the wire.
    pub api_secret: String,
    /// Folder (namespace) uploaded images are stored under.
    pub folder: String,
    /// Base URL of the upload API.
    pub api_base: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl CloudinaryConfig {
    /// Whether every credential needed to upload is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            folder: "places".to_string(),
            api_base: "https://api.cloudinary.com".to_string(),
            timeout_secs: 30,
        }
    }
}
