// src/integrations/blobstore/client.rs
//
// Blob storage integration: binary assets in, durable URLs out.
//
// The media pipeline addresses objects by deterministic path (see
// MediaService); this client only knows how to move bytes and how to turn
// a previously returned download URL back into an object path for deletion.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Upload-bytes-returning-URL and delete-by-URL, the full surface the
/// media pipeline needs. A test double implements this trait in-memory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path` and return a durable download URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String>;

    /// Best-effort delete. A missing or already-deleted asset is not an
    /// error; a URL this store never issued is.
    async fn delete(&self, url: &str) -> AppResult<()>;
}

/// Connection settings for the blob storage service.
#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    pub base_url: String,
    pub bucket: String,
}

impl BlobStoreConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            base_url: "https://firebasestorage.googleapis.com".to_string(),
            bucket: bucket.into(),
        }
    }

    /// `TRUCKHUB_STORAGE_BUCKET` is required; `TRUCKHUB_STORAGE_BASE_URL`
    /// overrides the endpoint (useful against an emulator).
    pub fn from_env() -> AppResult<Self> {
        let bucket = std::env::var("TRUCKHUB_STORAGE_BUCKET")
            .map_err(|_| AppError::Other("TRUCKHUB_STORAGE_BUCKET is not set".to_string()))?;
        let mut config = Self::new(bucket);
        if let Ok(base_url) = std::env::var("TRUCKHUB_STORAGE_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Canonical object URL; the object path travels as a single
    /// percent-encoded path segment.
    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(path)
        )
    }

    fn upload_url(&self, path: &str) -> String {
        format!(
            "{}/v0/b/{}/o?uploadType=media&name={}",
            self.base_url,
            self.bucket,
            urlencoding::encode(path)
        )
    }

    /// Recover the object path from a download URL issued by this store.
    /// Returns None for URLs belonging to other services.
    fn object_path_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/v0/b/{}/o/", self.base_url, self.bucket);
        let rest = url.strip_prefix(&prefix)?;
        let encoded = rest.split('?').next()?;
        Some(urlencoding::decode(encoded).ok()?.into_owned())
    }
}

/// Object metadata returned by the upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

/// Blob storage client
pub struct RemoteBlobStore {
    config: BlobStoreConfig,
    http_client: Client,
}

impl RemoteBlobStore {
    pub fn new(config: BlobStoreConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    async fn error_for_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut message = response.text().await.unwrap_or_default();
        message.truncate(512);
        Err(AppError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BlobStore for RemoteBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.config.upload_url(path))
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let metadata: UploadResponse = response.json().await?;

        let mut url = format!("{}?alt=media", self.config.object_url(path));
        if let Some(tokens) = metadata.download_tokens {
            // Comma-separated list; the first token is the active one
            if let Some(token) = tokens.split(',').next().filter(|t| !t.is_empty()) {
                url.push_str("&token=");
                url.push_str(token);
            }
        }
        Ok(url)
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        let path = self.config.object_path_from_url(url).ok_or_else(|| {
            AppError::Other(format!("Not a managed blob URL: {}", url))
        })?;

        let response = self
            .http_client
            .delete(self.config.object_url(&path))
            .send()
            .await?;
        // Already gone counts as deleted
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::error_for_status(response).await?;
        Ok(())
    }
}
