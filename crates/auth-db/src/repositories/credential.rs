//! PostgreSQL implementation of CredentialRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use auth_core::entities::CredentialRecord;
use auth_core::error::DomainError;
use auth_core::traits::{CredentialRepository, RepoResult};

use crate::models::CredentialModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CredentialRepository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    /// Create a new PgCredentialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PgCredentialRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<CredentialRecord>> {
        let result = sqlx::query_as::<_, CredentialModel>(
            r"
            SELECT username, password_hash, created_at
            FROM credentials
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CredentialRecord::from))
    }

    #[instrument(skip(self, password_hash))]
    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<CredentialRecord> {
        // Validate before touching the database so the error kind matches the in-memory store.
        let record = CredentialRecord::new(username, password_hash)?;

        // A concurrent insert of the same username loses on the primary key.
        let model = sqlx::query_as::<_, CredentialModel>(
            r"
            INSERT INTO credentials (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING username, password_hash, created_at
            ",
        )
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken(username.to_string())))?;

        Ok(CredentialRecord::from(model))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
