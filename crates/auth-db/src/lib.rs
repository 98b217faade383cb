//! # auth-db
//!
//! Credential store adapters implementing the repository trait from `auth-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgCredentialRepository` (durable) and `InMemoryCredentialRepository`
//!   (process-local, used by tests and the `memory` backend)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_db::{create_pool, run_migrations, PgCredentialRepository};
//!
//! async fn example(config: &auth_common::DatabaseConfig) -> Result<(), sqlx::Error> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let repo = PgCredentialRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{InMemoryCredentialRepository, PgCredentialRepository};
