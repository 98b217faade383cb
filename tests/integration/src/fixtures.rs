//! Test fixtures
//!
//! Request and response bodies as a client sees them on the wire.

use serde::{Deserialize, Serialize};

/// Body for both `/signup` and `/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// `201` body from `/signup`
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// `200` body from `/login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Error body from any endpoint
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
