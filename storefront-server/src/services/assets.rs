//! Catalog image storage
//!
//! Catalog option images live on an external asset host. The trait seam
//! lets tests run without one; the HTTP implementation uploads raw bytes
//! and maps the host's response into an [`ImageRef`].

use async_trait::async_trait;
use serde::Deserialize;
use shared::catalog::ImageRef;

use crate::utils::{AppError, AppResult};

#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> AppResult<ImageRef>;
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

/// Uploads to the configured asset host. With no endpoint configured,
/// uploads are rejected rather than silently dropped.
pub struct HttpAssetStore {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpAssetStore {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> AppResult<ImageRef> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or_else(|| AppError::validation("No asset host configured"))?;

        let response = self
            .client
            .post(endpoint)
            .header("x-filename", filename)
            .header(http::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Asset upload failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Asset host returned {}",
                response.status()
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Malformed asset host response: {e}")))?;

        Ok(ImageRef {
            url: uploaded.url,
            public_id: uploaded.public_id,
        })
    }
}
