//! Response DTOs for API endpoints

use serde::Serialize;

/// Message returned on successful signup
pub const SIGNUP_SUCCESSFUL: &str = "signup successful";

/// Message returned on successful login
pub const LOGIN_SUCCESSFUL: &str = "login successful";

/// Body of a `201` signup response. No token is issued at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

impl SignupResponse {
    pub fn created() -> Self {
        Self {
            message: SIGNUP_SUCCESSFUL.to_string(),
        }
    }
}

/// Body of a `200` login response
#[derive(Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self {
            message: LOGIN_SUCCESSFUL.to_string(),
            token,
        }
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("message", &self.message)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok(version: &'static str) -> Self {
        Self {
            status: "ok",
            version,
        }
    }
}

/// Readiness response with per-dependency results
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub credential_store: &'static str,
}

impl ReadinessResponse {
    pub fn from_store(store_ok: bool) -> Self {
        let (status, store) = if store_ok {
            ("ready", "ok")
        } else {
            ("not_ready", "unavailable")
        };
        Self {
            status,
            checks: HealthChecks {
                credential_store: store,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.credential_store == "ok"
    }
}
