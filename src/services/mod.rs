pub mod minter_service;
pub mod plan_service;
pub mod submit_service;
pub mod upload_service;
pub mod validation_service;
