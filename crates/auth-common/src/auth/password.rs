//! Password hashing and verification
//!
//! Uses Argon2id (OWASP recommended) with a fresh random salt per hash.
//! Digests are PHC strings, so the salt and cost parameters travel with them.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash, PasswordHasher as _,
        PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashingConfig;
use crate::error::AppError;

/// Argon2id password hasher with configurable cost
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher from cost configuration
    ///
    /// # Errors
    /// Returns `AppError::Hashing` if the cost parameters are out of range
    pub fn new(config: &HashingConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Hashing(format!("invalid argon2 parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a freshly generated salt
    ///
    /// # Errors
    /// Returns `AppError::Hashing` if the hasher fails (e.g. memory exhaustion)
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Hashing(format!("password hashing failed: {e}")))
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// Uses the salt and parameters embedded in the digest. The final comparison
    /// is constant-time.
    ///
    /// # Errors
    /// Returns `AppError::Hashing` if the digest cannot be parsed or verification
    /// fails for a reason other than a mismatch
    pub fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| AppError::Hashing(format!("invalid password hash format: {e}")))?;

        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(AppError::Hashing(format!("password verification failed: {e}"))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
