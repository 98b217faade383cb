//! # auth-core
//!
//! Domain layer for the credential service: the credential record, domain errors,
//! and the store trait the workflows depend on.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::CredentialRecord;
pub use error::DomainError;
pub use traits::{CredentialRepository, RepoResult};
