//! # auth-service
//!
//! Application layer containing the signup and login workflows, their
//! dependency context, error taxonomy, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use services::{AuthError, AuthService, ServiceContext, ServiceContextBuilder, ServiceResult};
