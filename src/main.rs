use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signer::Signer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod models;
mod services;
mod utils;
mod wallet;

use api::StorageClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tokensmith=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();

    let args = cli::MintArgs::parse();

    info!("🪙 tokensmith - Token-2022 fungible token minter");

    let wallet = match wallet::load_wallet() {
        Ok(w) => w,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("🔑 Wallet public key: {}", wallet.pubkey());
    info!("RPC endpoint: {}", args.rpc_endpoint);

    let rpc = RpcClient::new_with_commitment(
        args.rpc_endpoint.clone(),
        CommitmentConfig::confirmed(),
    );
    let storage = match &args.storage_url {
        Some(url) => StorageClient::with_base_url(args.storage_token.clone(), url.clone()),
        None => StorageClient::new(args.storage_token.clone()),
    };

    let request = args.to_request();
    match services::minter_service::run_mint(&rpc, &storage, &wallet, request).await {
        Ok(outcome) => {
            info!("✅ Token mint created");
            info!("   Mint:      {}", outcome.mint);
            info!("   Authority: {}", outcome.authority);
            info!("   Signature: {}", outcome.signature);
            println!("{}", explorer_url(&outcome.signature, &args.rpc_endpoint));
        }
        Err(e) => {
            error!("Mint failed: {}", e);
            if let Some(field) = e.field() {
                error!("Check the --{} value and resubmit", field);
            }
            std::process::exit(1);
        }
    }
}

/// Explorer link for a confirmed transaction
///
/// The cluster query parameter follows the RPC endpoint the
/// transaction was actually sent through; mainnet is the explorer's
/// default and gets no parameter.
fn explorer_url(signature: &solana_sdk::signature::Signature, rpc_endpoint: &str) -> String {
    let cluster = if rpc_endpoint.contains("devnet") {
        Some("devnet-solana")
    } else if rpc_endpoint.contains("testnet") {
        Some("testnet-solana")
    } else if rpc_endpoint.contains("localhost") || rpc_endpoint.contains("127.0.0.1") {
        Some("localnet-solana")
    } else {
        None
    };

    match cluster {
        Some(cluster) => format!("https://solana.fm/tx/{}?cluster={}", signature, cluster),
        None => format!("https://solana.fm/tx/{}", signature),
    }
}
