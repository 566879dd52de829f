use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, error};

use super::EvidenceUploader;
use crate::error::{AttendanceError, Result};

/// Uploads to a Supabase-compatible storage REST endpoint.
pub struct HttpUploader {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpUploader {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }
}

#[async_trait]
impl EvidenceUploader for HttpUploader {
    async fn upload(&self, bytes: Vec<u8>, bucket: &str, path: &str) -> Result<String> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(bucket, path))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("x-upsert", "true")
            .header(CONTENT_TYPE, "image/jpeg")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, bucket, path, "Storage request failed");
                if e.is_timeout() {
                    AttendanceError::Timeout("photo upload")
                } else {
                    AttendanceError::UploadFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, bucket, path, "Storage rejected upload");
            return Err(AttendanceError::UploadFailed(format!(
                "storage responded with {}",
                status
            )));
        }

        debug!(bucket, path, size, "Photo uploaded");
        Ok(self.public_url(bucket, path))
    }
}
