//! Resolved storage locations for uploaded assets

/// URIs returned by the storage backend for one submission
#[derive(Debug, Clone)]
pub struct UploadedAssets {
    pub image_uri: String,
    pub metadata_uri: String,
}
