//! Bearer token extractor
//!
//! Verifies `Authorization: Bearer <token>` locally with the shared signing
//! secret, the way downstream services check tokens issued by `/login`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use auth_common::{AppError, Claims};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller authenticated by a valid, unexpired token
#[derive(Debug, Clone)]
pub struct BearerAuth {
    pub claims: Claims,
}

impl BearerAuth {
    /// Username the token was issued to
    pub fn username(&self) -> &str {
        self.claims.subject()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Malformed and bad-signature tokens both surface as INVALID_TOKEN
        let claims = app_state
            .token_service()
            .validate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::App(AppError::from(e))
            })?;

        Ok(BearerAuth { claims })
    }
}
