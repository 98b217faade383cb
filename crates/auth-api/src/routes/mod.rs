//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(health_routes())
}

/// Authentication routes, mounted at the root for client compatibility
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
