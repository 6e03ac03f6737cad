//! Data models for the minting workflow
//!
//! Each model represents one stage of a submission: the raw form
//! request, the uploaded asset locations, the assembled transaction
//! plan, and the confirmed outcome.

pub mod assets;
pub mod metadata;
pub mod outcome;
pub mod plan;
pub mod request;

// Re-export commonly used types for convenience
pub use assets::UploadedAssets;
pub use metadata::MetadataDocument;
pub use outcome::MintOutcome;
pub use plan::MintPlan;
pub use request::{CheckedFields, MintRequest};
