//! Service context - dependency container for the workflows
//!
//! Holds the credential store handle, the password hasher, the token service,
//! and the per-step deadline. Everything is shared read-only across requests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use auth_common::{AppConfig, PasswordHasher, TokenService};
use auth_core::traits::CredentialRepository;
use tracing::error;

use super::error::{AuthError, ServiceResult};

/// Fallback deadline when none is configured
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all workflow dependencies
#[derive(Clone)]
pub struct ServiceContext {
    credential_repo: Arc<dyn CredentialRepository>,
    password_hasher: Arc<PasswordHasher>,
    token_service: Arc<TokenService>,
    operation_timeout: Duration,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        credential_repo: Arc<dyn CredentialRepository>,
        password_hasher: Arc<PasswordHasher>,
        token_service: Arc<TokenService>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            credential_repo,
            password_hasher,
            token_service,
            operation_timeout,
        }
    }

    /// Build a context from loaded configuration and a store handle
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if the hashing cost or the signing secret is unusable
    pub fn from_config(
        config: &AppConfig,
        credential_repo: Arc<dyn CredentialRepository>,
    ) -> ServiceResult<Self> {
        let password_hasher = PasswordHasher::new(&config.hashing)?;
        let token_service = TokenService::new(&config.jwt.secret, config.jwt.token_ttl())?;

        ServiceContextBuilder::new()
            .credential_repo(credential_repo)
            .password_hasher(Arc::new(password_hasher))
            .token_service(Arc::new(token_service))
            .operation_timeout(config.operation_timeout())
            .build()
    }

    /// Get the credential repository
    pub fn credential_repo(&self) -> &dyn CredentialRepository {
        self.credential_repo.as_ref()
    }

    /// Get a shared handle to the password hasher, for moving onto a blocking thread
    pub fn password_hasher(&self) -> Arc<PasswordHasher> {
        Arc::clone(&self.password_hasher)
    }

    /// Get the token service
    pub fn token_service(&self) -> &TokenService {
        self.token_service.as_ref()
    }

    /// Deadline applied to each blocking workflow step
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Run one workflow step under the operation deadline
    ///
    /// The step's own error is converted into an [`AuthError`]. Hitting the
    /// deadline is an internal fault.
    pub async fn with_deadline<T, E, F>(&self, step: &'static str, fut: F) -> ServiceResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<AuthError>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                error!(
                    step,
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Workflow step timed out"
                );
                Err(AuthError::internal(format!("{step} timed out")))
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("credential_repo", &"dyn CredentialRepository")
            .field("token_service", &self.token_service)
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    credential_repo: Option<Arc<dyn CredentialRepository>>,
    password_hasher: Option<Arc<PasswordHasher>>,
    token_service: Option<Arc<TokenService>>,
    operation_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            credential_repo: None,
            password_hasher: None,
            token_service: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn credential_repo(mut self, repo: Arc<dyn CredentialRepository>) -> Self {
        self.credential_repo = Some(repo);
        self
    }

    pub fn password_hasher(mut self, hasher: Arc<PasswordHasher>) -> Self {
        self.password_hasher = Some(hasher);
        self
    }

    pub fn token_service(mut self, service: Arc<TokenService>) -> Self {
        self.token_service = Some(service);
        self
    }

    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if a required dependency is missing or the deadline is zero
    pub fn build(self) -> ServiceResult<ServiceContext> {
        if self.operation_timeout.is_zero() {
            return Err(AuthError::internal("operation_timeout must be non-zero"));
        }

        Ok(ServiceContext::new(
            self.credential_repo
                .ok_or_else(|| AuthError::internal("credential_repo is required"))?,
            self.password_hasher.unwrap_or_default(),
            self.token_service
                .ok_or_else(|| AuthError::internal("token_service is required"))?,
            self.operation_timeout,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
