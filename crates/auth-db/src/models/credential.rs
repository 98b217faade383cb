//! Credential database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the credentials table
#[derive(Clone, FromRow)]
pub struct CredentialModel {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
