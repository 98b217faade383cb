//! Credential record - a username and the hash of its password

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Stored credential for a single user.
///
/// The username is the natural key; at most one record exists per username.
/// `password_hash` is always a PHC-format digest, never plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Create a new record stamped with the current time
    ///
    /// # Errors
    /// Returns `DomainError::ValidationError` if either field is empty
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        let password_hash = password_hash.into();

        if username.is_empty() {
            return Err(DomainError::ValidationError(
                "username must not be empty".to_string(),
            ));
        }
        if password_hash.is_empty() {
            return Err(DomainError::ValidationError(
                "password hash must not be empty".to_string(),
            ));
        }

        Ok(Self {
            username,
            password_hash,
            created_at: Utc::now(),
        })
    }
}

// The hash stays out of logs even though it is not plaintext.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
