//! Avatar object storage
//!
//! Byte storage is a collaborator behind the `AvatarStore` trait: upload
//! bytes, get back a public URL. The HTTP implementation targets an
//! upload endpoint that answers with `{"secure_url": "..."}`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Object storage errors
#[derive(Error, Debug)]
pub enum AvatarStoreError {
    /// Upload request failed
    #[error("upload failed: {0}")]
    Upload(String),

    /// Upload response could not be parsed
    #[error("malformed upload response: {0}")]
    MalformedResponse(String),
}

/// Object storage capability for avatar images
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Upload image bytes, returning a public URL
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, AvatarStoreError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Avatar store over an HTTP upload endpoint
pub struct HttpAvatarStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
}

impl HttpAvatarStore {
    /// Create a store for the given upload endpoint
    pub fn new(upload_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            upload_url: upload_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl AvatarStore for HttpAvatarStore {
    async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> Result<String, AvatarStoreError> {
        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Avatar upload request failed: {}", e);
                AvatarStoreError::Upload(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::error!("Avatar upload returned status: {}", response.status());
            return Err(AvatarStoreError::Upload(format!(
                "upload endpoint returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AvatarStoreError::MalformedResponse(e.to_string()))?;

        Ok(body.secure_url)
    }
}

impl std::fmt::Debug for HttpAvatarStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAvatarStore")
            .field("upload_url", &self.upload_url)
            .finish_non_exhaustive()
    }
}
