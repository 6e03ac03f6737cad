pub mod client;
pub mod models;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

use crate::utils::errors::MintError;

pub use client::StorageClient;

/// Capability interface over the storage backend
///
/// The uploader only needs bucket provisioning and file uploads, so
/// the workflow is written against this trait and the HTTP client is
/// one implementation of it.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Provision a bucket with the given reserved capacity, returning
    /// its key
    async fn create_storage_account(
        &self,
        name: &str,
        size: &str,
        owner: &Pubkey,
    ) -> Result<String, MintError>;

    /// Upload one file into a bucket, returning its public URI
    async fn upload_file(
        &self,
        bucket: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MintError>;
}
