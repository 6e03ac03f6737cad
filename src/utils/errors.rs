use solana_client::client_error::ClientError;
use solana_sdk::program_error::ProgramError;
use thiserror::Error;

/// Errors produced by the minting workflow
///
/// Validation failures carry no side effects; everything from
/// `Upload` onward may have touched the network. A failed submission
/// is never retried in place: a retry needs a fresh plan with a new
/// mint keypair and blockhash.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("{field} must be a whole number")]
    InvalidNumericField { field: &'static str },
    #[error("no icon image was provided")]
    MissingImage,
    #[error("invalid authority address: {0}")]
    InvalidAuthority(String),
    #[error("wallet not connected: {0}")]
    WalletNotConnected(String),
    #[error("storage upload failed: {0}")]
    Upload(String),
    #[error("supply does not fit in 64-bit base units")]
    AmountOverflow,
    #[error("instruction build failed: {0}")]
    Instruction(#[from] ProgramError),
    #[error("rpc request failed: {0}")]
    Rpc(#[from] ClientError),
    #[error("transaction submission failed: {0}")]
    Submission(String),
    #[error("blockhash expired before confirmation; rebuild with a new mint keypair to retry")]
    BlockhashExpired,
    #[error("confirmation timed out after {0} seconds")]
    ConfirmationTimeout(u64),
}

impl MintError {
    /// Name of the form field a validation error points at, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            MintError::InvalidNumericField { field } => Some(field),
            MintError::MissingImage => Some("image"),
            MintError::InvalidAuthority(_) => Some("authority"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_field_message_names_field() {
        let err = MintError::InvalidNumericField { field: "decimals" };
        assert_eq!(err.to_string(), "decimals must be a whole number");
        assert_eq!(err.field(), Some("decimals"));
    }

    #[test]
    fn test_non_validation_errors_have_no_field() {
        let err = MintError::Upload("connection reset".to_string());
        assert_eq!(err.field(), None);
    }
}
