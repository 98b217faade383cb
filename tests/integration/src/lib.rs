//! Integration test utilities for the auth service
//!
//! Spawns the real Axum app on a loopback listener and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
