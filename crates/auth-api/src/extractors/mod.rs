//! Axum extractors for request handling
//!
//! Custom extractors for validated JSON bodies and bearer-token authentication.

mod auth;
mod validated;

pub use auth::BearerAuth;
pub use validated::ValidatedJson;
