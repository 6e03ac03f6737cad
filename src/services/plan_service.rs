use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSimulateTransactionConfig;
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_associated_token_account::instruction::create_associated_token_account;
use spl_pod::optional_keys::OptionalNonZeroPubkey;
use spl_token_2022::extension::metadata_pointer;
use spl_token_2022::extension::ExtensionType;
use spl_token_2022::instruction::{initialize_mint, mint_to, set_authority, AuthorityType};
use spl_token_2022::state::Mint;
use spl_token_metadata_interface::instruction as metadata_instruction;
use spl_token_metadata_interface::state::{Field, TokenMetadata};
use tracing::{debug, warn};

use crate::models::{CheckedFields, MintPlan, MintRequest, UploadedAssets};
use crate::utils::{base_units, MintError};

/// Unit limit prefixed to the simulation probe so the dry run never
/// hits the per-transaction ceiling before reporting consumption
const SIMULATION_PROBE_UNITS: u32 = 1_400_000;
/// Conservative limit applied when the simulation round trip fails
const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 400_000;
const COMPUTE_UNIT_PRICE_MICROLAMPORTS: u64 = 1_000;

/// Inputs for assembling the core instruction sequence
pub struct InstructionParams<'a> {
    pub payer: &'a Pubkey,
    pub mint: &'a Pubkey,
    pub decimals: u8,
    /// Base units to mint, already scaled by 10^decimals
    pub amount: u64,
    pub space: u64,
    pub lamports: u64,
    pub name: &'a str,
    pub symbol: &'a str,
    pub metadata_uri: &'a str,
    pub image_uri: &'a str,
    pub authority_override: Option<Pubkey>,
}

/// Build a ready-to-sign plan for the request
///
/// Generates the mint keypair, sizes and rent-funds the account,
/// assembles the instruction sequence, prices it from a compute-unit
/// simulation, and pins it to the latest blockhash.
pub async fn build_plan(
    rpc: &RpcClient,
    payer: &Pubkey,
    request: &MintRequest,
    checked: &CheckedFields,
    assets: &UploadedAssets,
) -> Result<MintPlan, MintError> {
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();

    let amount = base_units(checked.supply, checked.decimals)?;

    // The mint account is created at extension size only; the token
    // metadata lives in the same account and is paid for up front, so
    // rent covers the packed metadata on top of the mint space.
    let space = ExtensionType::try_calculate_account_len::<Mint>(&[ExtensionType::MetadataPointer])?;
    let metadata_space = on_chain_metadata(payer, &mint, request, assets)?.tlv_size_of()?;
    let lamports = rpc
        .get_minimum_balance_for_rent_exemption(space + metadata_space)
        .await?;
    debug!(
        "Mint space {} + metadata {} bytes, rent {} lamports",
        space, metadata_space, lamports
    );

    let params = InstructionParams {
        payer,
        mint: &mint,
        decimals: checked.decimals,
        amount,
        space: space as u64,
        lamports,
        name: &request.name,
        symbol: &request.symbol,
        metadata_uri: &assets.metadata_uri,
        image_uri: &assets.image_uri,
        authority_override: checked.authority,
    };
    let mut instructions = assemble_instructions(&params)?;

    let mut budget = Vec::with_capacity(2);
    match simulate_units(rpc, &instructions, payer).await {
        Ok(Some(units)) => {
            debug!("Simulation consumed {} compute units", units);
            budget.push(ComputeBudgetInstruction::set_compute_unit_limit(
                unit_limit_for(units),
            ));
        }
        Ok(None) => {
            warn!("Simulation reported no unit count; sending without a unit limit");
        }
        Err(e) => {
            warn!("Simulation failed ({}); using default unit limit", e);
            budget.push(ComputeBudgetInstruction::set_compute_unit_limit(
                DEFAULT_COMPUTE_UNIT_LIMIT,
            ));
        }
    }
    budget.push(ComputeBudgetInstruction::set_compute_unit_price(
        COMPUTE_UNIT_PRICE_MICROLAMPORTS,
    ));
    instructions.splice(0..0, budget);

    let (blockhash, last_valid_block_height) = rpc
        .get_latest_blockhash_with_commitment(rpc.commitment())
        .await?;

    Ok(MintPlan {
        instructions,
        mint_keypair,
        payer: *payer,
        authority: checked.authority.unwrap_or(*payer),
        blockhash,
        last_valid_block_height,
    })
}

/// Assemble the core instruction sequence in dependency order
///
/// The create-account instruction must come first: every later
/// instruction references the mint it brings into existence. When an
/// authority override is requested it goes last, after every
/// mint-authority-dependent instruction has run, reassigning mint
/// authority, then freeze authority, then metadata update authority.
/// An override equal to the payer is a no-op and produces the same
/// sequence as no override.
pub fn assemble_instructions(p: &InstructionParams) -> Result<Vec<Instruction>, MintError> {
    let token_program = spl_token_2022::id();
    let token_account =
        get_associated_token_address_with_program_id(p.payer, p.mint, &token_program);

    let mut instructions = vec![
        system_instruction::create_account(p.payer, p.mint, p.lamports, p.space, &token_program),
        metadata_pointer::instruction::initialize(
            &token_program,
            p.mint,
            Some(*p.payer),
            Some(*p.mint),
        )?,
        initialize_mint(&token_program, p.mint, p.payer, None, p.decimals)?,
        metadata_instruction::initialize(
            &token_program,
            p.mint,
            p.payer,
            p.mint,
            p.payer,
            p.name.to_string(),
            p.symbol.to_string(),
            p.metadata_uri.to_string(),
        ),
        metadata_instruction::update_field(
            &token_program,
            p.mint,
            p.payer,
            Field::Key("image".to_string()),
            p.image_uri.to_string(),
        ),
        create_associated_token_account(p.payer, p.payer, p.mint, &token_program),
        mint_to(&token_program, p.mint, &token_account, p.payer, &[], p.amount)?,
    ];

    if let Some(new_authority) = p.authority_override.filter(|a| a != p.payer) {
        instructions.push(set_authority(
            &token_program,
            p.mint,
            Some(&new_authority),
            AuthorityType::MintTokens,
            p.payer,
            &[],
        )?);
        instructions.push(set_authority(
            &token_program,
            p.mint,
            Some(&new_authority),
            AuthorityType::FreezeAccount,
            p.payer,
            &[],
        )?);
        instructions.push(metadata_instruction::update_authority(
            &token_program,
            p.mint,
            p.payer,
            OptionalNonZeroPubkey::try_from(Some(new_authority))?,
        ));
    }

    Ok(instructions)
}

/// Unit limit from a simulated consumption count
///
/// The limit instruction takes a u32, so a consumption report beyond
/// that range falls back to the probe ceiling instead of wrapping to
/// a limit too small to execute under.
fn unit_limit_for(units: u64) -> u32 {
    u32::try_from(units).unwrap_or(SIMULATION_PROBE_UNITS)
}

/// On-chain metadata record, used both for sizing and as the source
/// of the initialize/update-field instruction contents
fn on_chain_metadata(
    payer: &Pubkey,
    mint: &Pubkey,
    request: &MintRequest,
    assets: &UploadedAssets,
) -> Result<TokenMetadata, MintError> {
    Ok(TokenMetadata {
        update_authority: OptionalNonZeroPubkey::try_from(Some(*payer))?,
        mint: *mint,
        name: request.name.clone(),
        symbol: request.symbol.clone(),
        uri: assets.metadata_uri.clone(),
        additional_metadata: vec![("image".to_string(), assets.image_uri.clone())],
    })
}

/// Dry-run the sequence against the network to learn its unit cost
///
/// A program error during the dry run yields `None`, same as a
/// missing unit count: the real submission reports the failure with
/// full context, so the probe result is advisory only.
async fn simulate_units(
    rpc: &RpcClient,
    instructions: &[Instruction],
    payer: &Pubkey,
) -> Result<Option<u64>, MintError> {
    let mut probe = Vec::with_capacity(instructions.len() + 1);
    probe.push(ComputeBudgetInstruction::set_compute_unit_limit(
        SIMULATION_PROBE_UNITS,
    ));
    probe.extend_from_slice(instructions);

    let transaction = Transaction::new_unsigned(Message::new(&probe, Some(payer)));
    let config = RpcSimulateTransactionConfig {
        sig_verify: false,
        replace_recent_blockhash: true,
        ..Default::default()
    };

    let response = rpc
        .simulate_transaction_with_config(&transaction, config)
        .await?;
    if let Some(err) = response.value.err {
        warn!("Simulation returned program error: {}", err);
        return Ok(None);
    }
    Ok(response.value.units_consumed)
}
