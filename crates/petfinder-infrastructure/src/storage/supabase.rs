// ============================================================================
// PetFinder Infrastructure - Supabase Storage
// File: crates/petfinder-infrastructure/src/storage/supabase.rs
// ============================================================================
//! Object store backed by the Supabase Storage REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use petfinder_core::error::DomainError;
use petfinder_core::storage::ObjectStore;
use petfinder_shared::constants::QR_CACHE_CONTROL_SECS;

#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(base_url: &str, service_key: &str, bucket: &str) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainError::Storage(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn object_endpoint(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

fn storage_error(action: &str, e: reqwest::Error) -> DomainError {
    error!("Storage {} request failed: {}", action, e);
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.object_endpoint(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "true")
            .header(CACHE_CONTROL, format!("max-age={}", QR_CACHE_CONTROL_SECS))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| storage_error("upload", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Upload of {} rejected ({}): {}", path, status, body);
            return Err(DomainError::Storage(format!("upload rejected ({}): {}", status, body)));
        }

        debug!("Uploaded {} to bucket {}", path, self.bucket);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .delete(self.object_endpoint(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| storage_error("delete", e))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Delete of {} rejected ({}): {}", path, status, body);
        Err(DomainError::Storage(format!("delete rejected ({}): {}", status, body)))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, path)
    }
}
