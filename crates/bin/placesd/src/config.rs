//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `places.toml` in the working directory (or the file named by
//! `PLACES_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::PathBuf;

use places_adapter_media_cloudinary::CloudinaryConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// JSON document settings.
    pub storage: StorageConfig,
    /// Request handling limits.
    pub http: HttpConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Media host (Cloudinary) settings.
    pub media: CloudinaryConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Flat-file storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON document holding every place.
    pub path: PathBuf,
    /// Create the document as an empty array on startup when missing.
    pub create_if_missing: bool,
}

/// Request handling limits.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Largest accepted request body, multipart uploads included.
    pub max_body_bytes: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PLACES_CONFIG").unwrap_or_else(|_| "places.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PLACES_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PLACES_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("PLACES_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("PLACES_STORAGE_PATH") {
            self.storage.path = PathBuf::from(val);
        }
        if let Some(val) = var("PLACES_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("CLOUDINARY_CLOUD_NAME") {
            self.media.cloud_name = val;
        }
        if let Some(val) = var("CLOUDINARY_API_KEY") {
            self.media.api_key = val;
        }
        if let Some(val) = var("CLOUDINARY_API_SECRET") {
            self.media.api_secret = val;
        }
        if let Some(val) = var("PLACES_MEDIA_FOLDER") {
            self.media.folder = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage path must not be empty".to_string(),
            ));
        }
        if self.http.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_body_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("places.json"),
            create_if_missing: true,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "placesd=info,places=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
