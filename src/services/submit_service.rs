use std::time::{Duration, Instant};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;
use tracing::{debug, info};

use crate::models::{MintOutcome, MintPlan};
use crate::utils::errors::MintError;

/// Upper bound on the confirmation wait; the blockhash usually
/// expires long before this, but the poll must never hang forever
const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Sign, broadcast, and wait for confirmation of a plan
///
/// The wallet and the new-mint keypair both sign. A program-level
/// failure or an expired blockhash is surfaced as-is: resubmitting
/// the same plan after partial on-chain effects collides with the
/// already-created account, so the caller retries by building a
/// fresh plan instead.
pub async fn submit(
    rpc: &RpcClient,
    wallet: &Keypair,
    plan: MintPlan,
) -> Result<MintOutcome, MintError> {
    submit_with_timeout(rpc, wallet, plan, CONFIRMATION_TIMEOUT).await
}

async fn submit_with_timeout(
    rpc: &RpcClient,
    wallet: &Keypair,
    plan: MintPlan,
    timeout: Duration,
) -> Result<MintOutcome, MintError> {
    let mut transaction = Transaction::new_with_payer(&plan.instructions, Some(&plan.payer));
    transaction
        .try_sign(&[wallet, &plan.mint_keypair], plan.blockhash)
        .map_err(|e| MintError::Submission(e.to_string()))?;

    let signature = rpc
        .send_transaction(&transaction)
        .await
        .map_err(|e| MintError::Submission(e.to_string()))?;
    info!("Broadcast transaction {}", signature);

    let started = Instant::now();
    loop {
        if started.elapsed() > timeout {
            return Err(MintError::ConfirmationTimeout(timeout.as_secs()));
        }

        match rpc
            .get_signature_status_with_commitment(&signature, rpc.commitment())
            .await?
        {
            Some(Ok(())) => {
                info!("✅ Confirmed {}", signature);
                return Ok(MintOutcome {
                    signature,
                    mint: plan.mint(),
                    authority: plan.authority,
                });
            }
            Some(Err(tx_err)) => return Err(MintError::Submission(tx_err.to_string())),
            None => {
                let height = rpc.get_block_height().await?;
                if height > plan.last_valid_block_height {
                    return Err(MintError::BlockhashExpired);
                }
                debug!(
                    "Awaiting confirmation, block height {} of {}",
                    height, plan.last_valid_block_height
                );
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    }
}
