use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use solana_sdk::signature::Keypair;

use crate::utils::errors::MintError;

const SECRET_KEY_ENV: &str = "SECRET_KEY";

/// Load the signing wallet from the environment
///
/// A missing or malformed key is the CLI equivalent of a disconnected
/// wallet: the workflow halts before any upload or on-chain work.
pub fn load_wallet() -> Result<Keypair, MintError> {
    let raw = std::env::var(SECRET_KEY_ENV)
        .map_err(|_| MintError::WalletNotConnected(format!("{} is not set", SECRET_KEY_ENV)))?;
    parse_secret_key(&raw)
}

/// Parse a secret key given as the solana-keygen JSON byte array or
/// as base64-encoded raw bytes
pub fn parse_secret_key(raw: &str) -> Result<Keypair, MintError> {
    let trimmed = raw.trim();
    let bytes: Vec<u8> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| MintError::WalletNotConnected(format!("bad key json: {}", e)))?
    } else {
        BASE64
            .decode(trimmed)
            .map_err(|e| MintError::WalletNotConnected(format!("bad base64 key: {}", e)))?
    };

    Keypair::from_bytes(&bytes).map_err(|e| MintError::WalletNotConnected(e.to_string()))
}
