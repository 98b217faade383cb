//! Repository traits (ports)

mod repositories;

pub use repositories::{CredentialRepository, RepoResult};
