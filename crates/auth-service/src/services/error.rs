//! Service layer error types
//!
//! Every workflow failure is one of four kinds. The transport layer maps each
//! kind to a single status and message without looking inside.

use std::fmt;

use auth_common::{AppError, TokenError};
use auth_core::DomainError;
use validator::ValidationErrors;

/// Message returned for both unknown usernames and password mismatches
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Message returned when a username is already registered
pub const USER_EXISTS: &str = "user exists";

/// Message returned for every internal fault
pub const INTERNAL_ERROR: &str = "internal server error";

/// Workflow error type
#[derive(Debug)]
pub enum AuthError {
    /// Malformed or missing input, correctable by the caller
    Validation(String),

    /// Username already taken. Carries the username for server-side logs only.
    Conflict(String),

    /// Unknown user or wrong password. Deliberately carries nothing.
    Authentication,

    /// Hashing, signing, store, or timeout fault. The detail is never shown to callers.
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(username) => write!(f, "Username already taken: {username}"),
            Self::Authentication => f.write_str("Invalid credentials"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Authentication => 401,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "USER_EXISTS",
            Self::Authentication => "INVALID_CREDENTIALS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Conflict(_) => USER_EXISTS.to_string(),
            Self::Authentication => INVALID_CREDENTIALS.to_string(),
            Self::Internal(_) => INTERNAL_ERROR.to_string(),
        }
    }

    /// Check if this is a server-side fault
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UsernameTaken(username) => Self::Conflict(username),
            DomainError::ValidationError(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(describe_validation_errors(&errors))
    }
}

/// Flatten field errors into `field: message` pairs, sorted by field name
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, AuthError>;
