//! Signed bearer tokens
//!
//! Tokens are HS256 JWTs signed with a process-wide secret. They are never stored
//! server-side, so a token stays valid until its `exp` even if the user changes.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Username, duplicated for consumers that read this claim instead of `sub`
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The authenticated username
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Expiry instant as a timestamp
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A token is live strictly before its expiry second
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Token failures
///
/// `Malformed` and `InvalidSignature` are kept apart for server-side logging only;
/// both convert to the same `AppError::InvalidToken`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed | TokenError::InvalidSignature => AppError::InvalidToken,
            TokenError::Expired => AppError::TokenExpired,
            TokenError::Signing(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Issues and validates signed tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenService {
    /// Create a token service with the given secret and default lifetime
    ///
    /// # Errors
    /// Returns `AppError::Config` if the secret is empty or the TTL is not positive
    pub fn new(secret: &str, default_ttl: Duration) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Config("JWT secret must not be empty".to_string()));
        }
        if default_ttl <= Duration::zero() {
            return Err(AppError::Config("token TTL must be positive".to_string()));
        }

        // Expiry is checked by hand against an injectable clock with zero leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl,
        })
    }

    /// Lifetime applied to tokens issued at login
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject` that expires `ttl` from now
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if encoding fails
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// # Errors
    /// Returns `TokenError::Signing` if the expiry is out of range or encoding fails
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing(format!("expiry overflows: ttl {ttl}")))?;

        let claims = Claims {
            sub: subject.to_string(),
            username: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token against the current time
    ///
    /// # Errors
    /// Returns `Malformed`, `InvalidSignature`, or `Expired`
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// # Errors
    /// Returns `Malformed`, `InvalidSignature`, or `Expired`
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = token_data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
