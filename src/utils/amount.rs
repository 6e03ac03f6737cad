use crate::utils::errors::MintError;

/// Convert a whole-token supply into base units (`supply * 10^decimals`)
///
/// Token amounts are exact base-unit counts, so this must stay in
/// checked 64-bit integer arithmetic end to end. Overflow of either
/// the scale factor or the product is `AmountOverflow`.
pub fn base_units(supply: u64, decimals: u8) -> Result<u64, MintError> {
    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(MintError::AmountOverflow)?;
    supply.checked_mul(scale).ok_or(MintError::AmountOverflow)
}
