//! Repository implementations
//!
//! Implementations of the `CredentialRepository` trait defined in auth-core.

mod credential;
mod error;
mod memory;

pub use credential::PgCredentialRepository;
pub use memory::InMemoryCredentialRepository;
