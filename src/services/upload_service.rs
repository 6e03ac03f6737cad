use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::api::StorageProvider;
use crate::models::{MetadataDocument, MintRequest, UploadedAssets};
use crate::utils::errors::MintError;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Upload the icon image and derived metadata document, in that order
///
/// The metadata document embeds the image URI, so the image upload
/// must finish first. The bucket is provisioned before either upload,
/// sized from the image byte length; under-provisioning makes the
/// backend reject the upload outright.
pub async fn upload_assets(
    storage: &dyn StorageProvider,
    owner: &Pubkey,
    request: &MintRequest,
) -> Result<UploadedAssets, MintError> {
    let image_path = request.image.as_ref().ok_or(MintError::MissingImage)?;
    let image_bytes = tokio::fs::read(image_path)
        .await
        .map_err(|e| MintError::Upload(format!("cannot read {}: {}", image_path.display(), e)))?;

    let filename = image_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("icon.png")
        .to_string();

    let reserve = reserve_size(image_bytes.len() as u64);
    let bucket = storage
        .create_storage_account(&format!("My{}Bucket", request.name), &reserve, owner)
        .await?;
    info!("Storage bucket {} reserved at {}", bucket, reserve);

    let image_uri = storage
        .upload_file(&bucket, &filename, content_type_for(&filename), image_bytes)
        .await?;
    info!("Uploaded image: {}", image_uri);

    let document = MetadataDocument::new(request, image_uri.clone());
    let json = serde_json::to_vec(&document)
        .map_err(|e| MintError::Upload(format!("cannot serialize metadata: {}", e)))?;

    let metadata_uri = storage
        .upload_file(&bucket, "metadata.json", "application/json", json)
        .await?;
    info!("Uploaded metadata: {}", metadata_uri);

    Ok(UploadedAssets {
        image_uri,
        metadata_uri,
    })
}

/// Human-readable bucket capacity for an image of `bytes` length
///
/// Binary units, rounded up so the upload never hits a short bucket.
/// KB amounts round up to the nearest 10 and carry 4 KB of slack for
/// the metadata document that lands in the same bucket.
pub fn reserve_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }
    let exp = ((63 - bytes.leading_zeros() as u64) / 10).min(UNITS.len() as u64 - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let amount = if exp == 1 {
        (value / 10.0).ceil() as u64 * 10 + 4
    } else {
        value.ceil() as u64
    };
    format!("{}{}", amount, UNITS[exp as usize])
}

/// Content type from the image filename extension
pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls instead of talking to a backend
    struct RecordingStorage {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingStorage {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StorageProvider for RecordingStorage {
        async fn create_storage_account(
            &self,
            name: &str,
            size: &str,
            _owner: &Pubkey,
        ) -> Result<String, MintError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create:{}:{}", name, size));
            Ok("bucket111".to_string())
        }

        async fn upload_file(
            &self,
            bucket: &str,
            filename: &str,
            _content_type: &str,
            bytes: Vec<u8>,
        ) -> Result<String, MintError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("upload:{}:{}:{}", bucket, filename, bytes.len()));
            Ok(format!("https://shdw.example/{}/{}", bucket, filename))
        }
    }

    #[tokio::test]
    async fn test_image_uploads_before_metadata() {
        let dir = std::env::temp_dir().join("tokensmith-upload-test");
        std::fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("icon.png");
        std::fs::write(&image_path, vec![0u8; 2048]).unwrap();

        let storage = RecordingStorage::new();
        let owner = Pubkey::new_unique();
        let request = MintRequest {
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            image: Some(image_path),
            ..Default::default()
        };

        let assets = upload_assets(&storage, &owner, &request).await.unwrap();
        assert_eq!(assets.image_uri, "https://shdw.example/bucket111/icon.png");
        assert_eq!(
            assets.metadata_uri,
            "https://shdw.example/bucket111/metadata.json"
        );

        let calls = storage.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], "create:MyFooBucket:14KB");
        assert!(calls[1].starts_with("upload:bucket111:icon.png:"));
        assert!(calls[2].starts_with("upload:bucket111:metadata.json:"));

        // The metadata document uploaded second embeds the image URI
        // resolved first
        let json_len: usize = calls[2].rsplit(':').next().unwrap().parse().unwrap();
        assert!(json_len > 0);
    }

    #[tokio::test]
    async fn test_missing_image_fails_before_any_storage_call() {
        let storage = RecordingStorage::new();
        let owner = Pubkey::new_unique();
        let request = MintRequest::default();

        let err = upload_assets(&storage, &owner, &request).await.unwrap_err();
        assert!(matches!(err, MintError::MissingImage));
        assert!(storage.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reserve_size_rounds_up() {
        assert_eq!(reserve_size(0), "0B");
        assert_eq!(reserve_size(1), "1B");
        assert_eq!(reserve_size(512), "512B");
        assert_eq!(reserve_size(1023), "1023B");
        // KB sizes round to the next 10KB plus 4KB slack
        assert_eq!(reserve_size(1024), "14KB");
        assert_eq!(reserve_size(50 * 1024), "54KB");
        assert_eq!(reserve_size(51 * 1024), "64KB");
        // Above KB the amount rounds up whole
        assert_eq!(reserve_size(3 * 1024 * 1024), "3MB");
        assert_eq!(reserve_size(3 * 1024 * 1024 + 1), "4MB");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("icon.png"), "image/png");
        assert_eq!(content_type_for("icon.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("mystery"), "application/octet-stream");
    }
}
