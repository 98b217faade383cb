//! Business logic services
//!
//! Workflows sequence the credential store, the password hasher, and the
//! token service. Each step maps its failure to an [`AuthError`] before
//! returning.

pub mod auth;
pub mod context;
pub mod error;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{AuthError, ServiceResult};
