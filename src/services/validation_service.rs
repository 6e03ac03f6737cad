use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::models::{CheckedFields, MintRequest};
use crate::utils::errors::MintError;

/// Validate a mint request before any network work begins
///
/// Checks run in form order: decimals, supply, image, then the
/// optional authority override. The first failure is returned, so a
/// rejected request has caused no side effects at all.
pub fn validate(request: &MintRequest) -> Result<CheckedFields, MintError> {
    let decimals = parse_whole::<u8>(&request.decimals, "decimals")?;
    let supply = parse_whole::<u64>(&request.supply, "supply")?;
    if supply == 0 {
        return Err(MintError::InvalidNumericField { field: "supply" });
    }

    if request.image.is_none() {
        return Err(MintError::MissingImage);
    }

    let authority = match &request.authority {
        Some(raw) => Some(
            Pubkey::from_str(raw.trim())
                .map_err(|_| MintError::InvalidAuthority(raw.clone()))?,
        ),
        None => None,
    };

    Ok(CheckedFields {
        supply,
        decimals,
        authority,
    })
}

fn parse_whole<T: FromStr>(raw: &str, field: &'static str) -> Result<T, MintError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| MintError::InvalidNumericField { field })
}
