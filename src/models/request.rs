//! Mint request form data

use std::path::PathBuf;

use solana_sdk::pubkey::Pubkey;

/// Raw form input for one mint submission
///
/// `supply` and `decimals` stay as the strings the user typed until
/// validation parses them; socials that were left blank are `None`.
#[derive(Debug, Clone, Default)]
pub struct MintRequest {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub supply: String,
    pub decimals: String,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub discord: Option<String>,
    pub image: Option<PathBuf>,
    pub authority: Option<String>,
}

/// Numeric fields of a request after validation
#[derive(Debug, Clone, Copy)]
pub struct CheckedFields {
    pub supply: u64,
    pub decimals: u8,
    pub authority: Option<Pubkey>,
}
