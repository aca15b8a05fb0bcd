//! Signed uploads against the Cloudinary upload API.

use std::future::Future;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use places_app::ports::{ImageUpload, MediaHost};
use places_domain::error::PlacesError;

use crate::config::CloudinaryConfig;
use crate::error::MediaError;

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Compute a Cloudinary request signature.
///
/// Parameters are sorted by name, joined as `name=value` with `&`, suffixed
/// with the API secret, and hashed with SHA-256.
#[must_use]
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_unstable_by_key(|(name, _)| *name);

    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// [`MediaHost`] that stores images on Cloudinary.
pub struct CloudinaryMediaHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryMediaHost {
    /// Create a media host from its configuration.
    ///
    /// Missing credentials are not an error here; uploads will fail with
    /// [`MediaError::NotConfigured`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Client`] if the HTTP client cannot be built.
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MediaError::Client)?;
        Ok(Self { config, client })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    async fn upload_at(&self, image: ImageUpload, timestamp: i64) -> Result<String, MediaError> {
        if !self.config.is_configured() {
            return Err(MediaError::NotConfigured);
        }

        let timestamp = timestamp.to_string();
        let signature = sign(
            &[
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
        );

        let mut part = Part::bytes(image.bytes).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map_or_else(|_| "unknown error".to_string(), |body| body.error.message);
            tracing::warn!(status = status.as_u16(), %message, "upload rejected");
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response.json().await?;
        tracing::info!(file = %image.file_name, url = %body.secure_url, "image uploaded");
        Ok(body.secure_url)
    }
}

impl MediaHost for CloudinaryMediaHost {
    fn upload(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<String, PlacesError>> + Send {
        async move {
            let timestamp = places_domain::time::now().timestamp();
            Ok(self.upload_at(image, timestamp).await?)
        }
    }
}
