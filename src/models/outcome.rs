//! Confirmed mint result

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

/// Result of a confirmed mint submission
#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub signature: Signature,
    pub mint: Pubkey,
    pub authority: Pubkey,
}
