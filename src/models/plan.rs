//! Assembled mint transaction plan

use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;

/// Everything needed to sign and broadcast one mint transaction
///
/// The mint keypair is generated once per request and must co-sign:
/// the create-account instruction brings the account into existence,
/// so the wallet alone cannot authorize it. `blockhash` and
/// `last_valid_block_height` bound how long the plan stays valid;
/// an expired plan is rebuilt, never re-signed.
pub struct MintPlan {
    pub instructions: Vec<Instruction>,
    pub mint_keypair: Keypair,
    pub payer: Pubkey,
    /// Authority that ends up holding mint/update control after the
    /// plan executes (the payer unless an override was requested)
    pub authority: Pubkey,
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

impl MintPlan {
    /// Address of the mint the plan creates
    pub fn mint(&self) -> Pubkey {
        self.mint_keypair.pubkey()
    }
}
