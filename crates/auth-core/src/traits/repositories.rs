//! Repository traits (ports) - define the interface for credential storage
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::CredentialRecord;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Credential Repository
// ============================================================================

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the credential record for a username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<CredentialRecord>>;

    /// Insert a new credential record.
    ///
    /// Implementations must enforce username uniqueness atomically and report a
    /// duplicate as `DomainError::UsernameTaken`, even when a prior lookup found
    /// nothing.
    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<CredentialRecord>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
