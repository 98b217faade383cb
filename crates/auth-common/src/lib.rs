//! # auth-common
//!
//! Shared utilities including configuration, error handling, password hashing,
//! signed tokens, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, PasswordHasher, TokenError, TokenService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, HashingConfig,
    JwtConfig, ServerConfig, StoreBackend, StoreConfig,
};
pub use error::{AppError, ErrorResponse};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
