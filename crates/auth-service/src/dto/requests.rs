//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. Passwords are
//! redacted from `Debug` output so request logging never prints them.

use std::fmt;

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Usernames are stored and compared as text, so control characters (NUL
/// included, which Postgres cannot store) are refused up front.
fn printable_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().any(char::is_control) {
        let mut err = ValidationError::new("control_character");
        err.message = Some("Username must not contain control characters".into());
        return Err(err);
    }
    Ok(())
}

/// Account creation request
#[derive(Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, message = "Username must not be empty"),
        custom(function = "printable_username")
    )]
    pub username: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Credential check request
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "Username must not be empty"),
        custom(function = "printable_username")
    )]
    pub username: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl SignupRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
