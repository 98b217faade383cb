//! Authentication service
//!
//! Signup: validate, look up, hash, insert. Login: validate, look up, verify,
//! issue a token. Store and hashing steps run under the context deadline.

use tokio::task;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

use super::context::ServiceContext;
use super::error::{AuthError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new username/password pair
    ///
    /// The lookup before hashing is a fast path. Two racing signups can both
    /// pass it, so the store's conflict on insert is what guarantees a single
    /// record per username, and it maps to the same error as a lookup hit.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        request.validate()?;
        let SignupRequest { username, password } = request;

        let existing = self
            .ctx
            .with_deadline("lookup", self.ctx.credential_repo().find_by_username(&username))
            .await?;
        if existing.is_some() {
            info!("Signup rejected: username already taken");
            return Err(AuthError::Conflict(username));
        }

        let hasher = self.ctx.password_hasher();
        let password_hash = self
            .ctx
            .with_deadline("hash", async move {
                task::spawn_blocking(move || hasher.hash(&password))
                    .await
                    .map_err(|e| AuthError::internal(format!("hashing task failed: {e}")))?
                    .map_err(AuthError::from)
            })
            .await?;

        self.ctx
            .with_deadline(
                "insert",
                self.ctx.credential_repo().insert(&username, &password_hash),
            )
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::Conflict(_)) {
                    info!("Signup rejected: lost insert race for username");
                }
            })?;

        info!("User signed up");
        Ok(SignupResponse::created())
    }

    /// Check a username/password pair and issue a token
    ///
    /// Unknown usernames and wrong passwords produce the same error. The
    /// reason is only recorded in the server log.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request.validate()?;
        let LoginRequest { username, password } = request;

        let Some(record) = self
            .ctx
            .with_deadline("lookup", self.ctx.credential_repo().find_by_username(&username))
            .await?
        else {
            warn!(reason = "unknown_user", "Login failed");
            return Err(AuthError::Authentication);
        };

        let hasher = self.ctx.password_hasher();
        let digest = record.password_hash;
        let matches = self
            .ctx
            .with_deadline("verify", async move {
                task::spawn_blocking(move || hasher.verify(&digest, &password))
                    .await
                    .map_err(|e| AuthError::internal(format!("verify task failed: {e}")))?
                    .map_err(AuthError::from)
            })
            .await?;

        if !matches {
            warn!(reason = "password_mismatch", "Login failed");
            return Err(AuthError::Authentication);
        }

        let tokens = self.ctx.token_service();
        let token = tokens.issue(&record.username, tokens.default_ttl())?;

        info!("User logged in");
        Ok(LoginResponse::new(token))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use auth_common::{HashingConfig, PasswordHasher, TokenService};
    use auth_core::entities::CredentialRecord;
    use auth_core::error::DomainError;
    use auth_core::traits::{CredentialRepository, RepoResult};
    use auth_db::InMemoryCredentialRepository;

    use super::*;
    use crate::services::context::ServiceContextBuilder;

    const SECRET: &str = "auth-service-test-secret";

    fn fast_hasher() -> Arc<PasswordHasher> {
        Arc::new(
            PasswordHasher::new(&HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        )
    }

    fn context_with(repo: Arc<dyn CredentialRepository>, timeout: Duration) -> ServiceContext {
        ServiceContextBuilder::new()
            .credential_repo(repo)
            .password_hasher(fast_hasher())
            .token_service(Arc::new(
                TokenService::new(SECRET, chrono::Duration::hours(24)).unwrap(),
            ))
            .operation_timeout(timeout)
            .build()
            .unwrap()
    }

    fn context() -> ServiceContext {
        context_with(
            Arc::new(InMemoryCredentialRepository::new()),
            Duration::from_secs(5),
        )
    }

    /// Store that fails every call
    struct BrokenStore;

    #[async_trait]
    impl CredentialRepository for BrokenStore {
        async fn find_by_username(&self, _: &str) -> RepoResult<Option<CredentialRecord>> {
            Err(DomainError::DatabaseError("connection refused".into()))
        }

        async fn insert(&self, _: &str, _: &str) -> RepoResult<CredentialRecord> {
            Err(DomainError::DatabaseError("connection refused".into()))
        }

        async fn health_check(&self) -> RepoResult<()> {
            Err(DomainError::DatabaseError("connection refused".into()))
        }
    }

    /// Store whose lookups never complete
    struct HangingStore;

    #[async_trait]
    impl CredentialRepository for HangingStore {
        async fn find_by_username(&self, _: &str) -> RepoResult<Option<CredentialRecord>> {
            std::future::pending().await
        }

        async fn insert(&self, _: &str, _: &str) -> RepoResult<CredentialRecord> {
            std::future::pending().await
        }

        async fn health_check(&self) -> RepoResult<()> {
            Ok(())
        }
    }

    /// Store whose lookup always misses, so only the insert sees the existing record
    struct StaleLookupStore {
        inner: InMemoryCredentialRepository,
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl CredentialRepository for StaleLookupStore {
        async fn find_by_username(&self, _: &str) -> RepoResult<Option<CredentialRecord>> {
            Ok(None)
        }

        async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<CredentialRecord> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            self.inner.insert(username, password_hash).await
        }

        async fn health_check(&self) -> RepoResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let ctx = context();
        let service = AuthService::new(&ctx);

        let created = service
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap();
        assert_eq!(created.message, "signup successful");

        let login = service
            .login(LoginRequest::new("alice", "pw1"))
            .await
            .unwrap();
        assert_eq!(login.message, "login successful");

        let claims = ctx.token_service().validate(&login.token).unwrap();
        assert_eq!(claims.subject(), "alice");
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_plaintext() {
        let repo = InMemoryCredentialRepository::new();
        let ctx = context_with(Arc::new(repo.clone()), Duration::from_secs(5));

        AuthService::new(&ctx)
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap();

        let record = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(record.password_hash, "pw1");
        assert!(record.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let ctx = context();
        let service = AuthService::new(&ctx);

        service
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap();
        let err = service
            .signup(SignupRequest::new("alice", "other"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Conflict(_)));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_insert_conflict_matches_precheck_conflict() {
        let store = Arc::new(StaleLookupStore {
            inner: InMemoryCredentialRepository::new(),
            inserts: AtomicUsize::new(0),
        });
        let ctx = context_with(store.clone(), Duration::from_secs(5));
        let service = AuthService::new(&ctx);

        service
            .signup(SignupRequest::new("carol", "pw1"))
            .await
            .unwrap();
        let err = service
            .signup(SignupRequest::new("carol", "pw2"))
            .await
            .unwrap_err();

        // The lookup missed both times, so the second rejection came from the insert.
        assert_eq!(store.inserts.load(Ordering::SeqCst), 2);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.public_message(), "user exists");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_single_winner() {
        let ctx = context();

        let attempts = (0..8).map(|i| {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                AuthService::new(&ctx)
                    .signup(SignupRequest::new("carol", format!("pw{i}")))
                    .await
            })
        });
        let results = futures::future::join_all(attempts).await;

        let created = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(AuthError::Conflict(_)))))
            .count();
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_empty_fields_are_validation_errors() {
        let ctx = context();
        let service = AuthService::new(&ctx);

        let err = service
            .signup(SignupRequest::new("", "pw1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = service
            .login(LoginRequest::new("alice", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_nul_in_username_is_rejected_before_the_store() {
        let ctx = context_with(Arc::new(BrokenStore), Duration::from_secs(5));
        let service = AuthService::new(&ctx);

        let err = service
            .signup(SignupRequest::new("al\u{0}ice", "pw1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.public_message().contains("control characters"));

        let err = service
            .login(LoginRequest::new("al\u{0}ice", "pw1"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let ctx = context();
        let service = AuthService::new(&ctx);
        service
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap();

        let wrong = service
            .login(LoginRequest::new("alice", "wrong"))
            .await
            .unwrap_err();
        let unknown = service
            .login(LoginRequest::new("bob", "pw1"))
            .await
            .unwrap_err();

        assert_eq!(wrong.status_code(), 401);
        assert_eq!(wrong.status_code(), unknown.status_code());
        assert_eq!(wrong.error_code(), unknown.error_code());
        assert_eq!(wrong.public_message(), unknown.public_message());
    }

    #[tokio::test]
    async fn test_store_fault_is_internal() {
        let ctx = context_with(Arc::new(BrokenStore), Duration::from_secs(5));
        let service = AuthService::new(&ctx);

        let err = service
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
        assert!(!err.public_message().contains("connection refused"));

        let err = service
            .login(LoginRequest::new("alice", "pw1"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[tokio::test]
    async fn test_hanging_store_times_out() {
        let ctx = context_with(Arc::new(HangingStore), Duration::from_millis(50));
        let service = AuthService::new(&ctx);

        let err = service
            .signup(SignupRequest::new("alice", "pw1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(ref m) if m.contains("timed out")));

        let err = service
            .login(LoginRequest::new("alice", "pw1"))
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }
}
