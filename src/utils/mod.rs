pub mod amount;
pub mod errors;

pub use amount::base_units;
pub use errors::MintError;
