use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use super::models::{
    CreateStorageAccountRequest, CreateStorageAccountResponse, ErrorResponse, UploadResponse,
};
use super::StorageProvider;
use crate::utils::errors::MintError;

/// Storage API client for bucket provisioning and file uploads
pub struct StorageClient {
    http_client: HttpClient,
    api_token: Option<String>,
    base_url: String,
}

impl StorageClient {
    const DEFAULT_BASE_URL: &'static str = "https://shadow-storage.genesysgo.net";

    /// Create a new storage API client
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_token: Option<String>, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            base_url,
        }
    }

    /// Create default headers, with authorization when a token is configured
    fn create_headers(&self) -> Result<HeaderMap, MintError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.api_token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| MintError::Upload(format!("invalid api token: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Turn a non-success response into an upload error, preferring the
    /// JSON `message`/`error` field over the raw body
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> MintError {
        let body_text = response.text().await.unwrap_or_default();

        let reason = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or(body_text);

        if status.is_server_error() {
            warn!("Storage API server error {}: {}", status.as_u16(), reason);
        }
        MintError::Upload(format!("storage api returned {}: {}", status.as_u16(), reason))
    }
}

#[async_trait]
impl StorageProvider for StorageClient {
    async fn create_storage_account(
        &self,
        name: &str,
        size: &str,
        owner: &Pubkey,
    ) -> Result<String, MintError> {
        let request = CreateStorageAccountRequest {
            name: name.to_string(),
            size: size.to_string(),
            owner: owner.to_string(),
        };

        let response = self
            .http_client
            .post(format!("{}/storage-account", self.base_url))
            .headers(self.create_headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| MintError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let created: CreateStorageAccountResponse = response
            .json()
            .await
            .map_err(|e| MintError::Upload(format!("bad storage-account response: {}", e)))?;

        debug!("New storage bucket: {}", created.shdw_bucket);
        Ok(created.shdw_bucket)
    }

    async fn upload_file(
        &self,
        bucket: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MintError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| MintError::Upload(format!("invalid content type: {}", e)))?;
        let form = Form::new()
            .text("storage_account", bucket.to_string())
            .part("file", part);

        let mut builder = self
            .http_client
            .post(format!("{}/upload", self.base_url))
            .multipart(form);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MintError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MintError::Upload(format!("bad upload response: {}", e)))?;

        uploaded
            .finalized_locations
            .into_iter()
            .next()
            .ok_or_else(|| {
                MintError::Upload(format!("no finalized location returned for {}", filename))
            })
    }
}
