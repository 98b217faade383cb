//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use auth_common::{AppConfig, AppError, StoreBackend};
use auth_core::traits::CredentialRepository;
use auth_db::{create_pool, run_migrations, InMemoryCredentialRepository, PgCredentialRepository};
use auth_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(
        create_router(),
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Open the configured credential store
pub async fn create_credential_store(
    config: &AppConfig,
) -> Result<Arc<dyn CredentialRepository>, AppError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let db_config = config.store.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres store".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Config(format!("Failed to connect to PostgreSQL: {e}")))?;
            run_migrations(&pool).await.map_err(AppError::internal)?;
            info!("PostgreSQL connection established");

            Ok(Arc::new(PgCredentialRepository::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory credential store; accounts are lost on restart");
            Ok(Arc::new(InMemoryCredentialRepository::new()))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let credential_repo = create_credential_store(&config).await?;

    let service_context = ServiceContext::from_config(&config, credential_repo)
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl-C
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
