use serde::{Deserialize, Serialize};

/// Request body for POST /storage-account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStorageAccountRequest {
    /// Human-readable bucket name
    pub name: String,
    /// Reserved capacity, e.g. "14KB"
    pub size: String,
    /// Base58 wallet address that owns the bucket
    pub owner: String,
}

/// Response from POST /storage-account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStorageAccountResponse {
    /// Base58 key of the newly provisioned bucket
    pub shdw_bucket: String,
    pub transaction_signature: Option<String>,
}

/// Response from POST /upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Public URIs of the stored file, one per replica
    pub finalized_locations: Vec<String>,
    pub message: Option<String>,
}

/// Error response body from the storage API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
