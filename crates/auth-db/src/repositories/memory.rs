//! In-memory implementation of CredentialRepository
//!
//! Backed by a [`DashMap`]. Inserts go through the entry API, which holds the
//! shard lock across the existence check and the write, so two concurrent
//! inserts of the same username cannot both succeed.
//!
//! Data is not persisted; everything is lost when the process exits.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::instrument;

use auth_core::entities::CredentialRecord;
use auth_core::error::DomainError;
use auth_core::traits::{CredentialRepository, RepoResult};

/// Process-local credential store
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    records: Arc<DashMap<String, CredentialRecord>>,
}

impl InMemoryCredentialRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl std::fmt::Debug for InMemoryCredentialRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCredentialRepository")
            .field("records", &self.records.len())
            .finish()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<CredentialRecord>> {
        Ok(self.records.get(username).map(|r| r.value().clone()))
    }

    #[instrument(skip(self, password_hash))]
    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<CredentialRecord> {
        let record = CredentialRecord::new(username, password_hash)?;

        match self.records.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(DomainError::UsernameTaken(username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
