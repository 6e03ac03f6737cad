use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use tracing::info;

use crate::api::StorageProvider;
use crate::models::{MintOutcome, MintRequest};
use crate::services::{plan_service, submit_service, upload_service, validation_service};
use crate::utils::errors::MintError;

/// Run one mint submission end to end
///
/// Stages run strictly in order: validate, upload assets, build the
/// plan, submit. Each stage's input depends on the previous stage's
/// output, and a failure at any stage stops the flow before the next
/// side effect.
pub async fn run_mint(
    rpc: &RpcClient,
    storage: &dyn StorageProvider,
    wallet: &Keypair,
    request: MintRequest,
) -> Result<MintOutcome, MintError> {
    let payer = wallet.pubkey();

    let checked = validation_service::validate(&request)?;
    info!(
        "Minting {} {} ({} at {} decimals)",
        checked.supply, request.symbol, request.name, checked.decimals
    );

    let assets = upload_service::upload_assets(storage, &payer, &request).await?;

    let plan = plan_service::build_plan(rpc, &payer, &request, &checked, &assets).await?;
    info!("Mint address {}", plan.mint());

    submit_service::submit(rpc, wallet, plan).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solana_sdk::pubkey::Pubkey;
    use std::path::PathBuf;

    /// Rejects the very first storage call, like a dead backend
    struct FailingStorage;

    #[async_trait]
    impl StorageProvider for FailingStorage {
        async fn create_storage_account(
            &self,
            _name: &str,
            _size: &str,
            _owner: &Pubkey,
        ) -> Result<String, MintError> {
            Err(MintError::Upload("connection refused".to_string()))
        }

        async fn upload_file(
            &self,
            _bucket: &str,
            _filename: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> Result<String, MintError> {
            unreachable!("upload must not run when bucket creation fails")
        }
    }

    #[tokio::test]
    async fn test_upload_failure_aborts_before_chain_work() {
        let dir = std::env::temp_dir().join("tokensmith-minter-test");
        std::fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("icon.png");
        std::fs::write(&image_path, vec![0u8; 256]).unwrap();

        // The RPC client never sees a request: the flow dies at upload
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        let wallet = Keypair::new();
        let request = MintRequest {
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            supply: "10000".to_string(),
            decimals: "2".to_string(),
            image: Some(image_path),
            ..Default::default()
        };

        let err = run_mint(&rpc, &FailingStorage, &wallet, request)
            .await
            .unwrap_err();
        assert!(matches!(err, MintError::Upload(_)));
    }

    #[tokio::test]
    async fn test_validation_failure_precedes_everything() {
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        let wallet = Keypair::new();
        let request = MintRequest {
            name: "Foo".to_string(),
            symbol: "FOO".to_string(),
            supply: "10000".to_string(),
            decimals: "two".to_string(),
            image: Some(PathBuf::from("icon.png")),
            ..Default::default()
        };

        let err = run_mint(&rpc, &FailingStorage, &wallet, request)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MintError::InvalidNumericField { field: "decimals" }
        ));
    }
}
