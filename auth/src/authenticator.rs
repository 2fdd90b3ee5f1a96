use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret and the hasher for the lifetime of the process;
/// both are fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: &'static str,
    /// Expiration instant of `access_token`
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default password hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_password_hasher(jwt_secret, PasswordHasher::new())
    }

    /// Create a new authenticator with an explicitly configured hasher.
    pub fn with_password_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, crate::PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored digest.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        self.password_hasher.verify(password, digest)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored password digest
    /// * `subject` - Subject to issue the token for
    /// * `ttl` - Token time-to-live
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        digest: &str,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, digest) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, ttl)?)
    }

    /// Issue a token for an already authenticated subject.
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is not positive
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, JwtError> {
        self.issue_token_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_token_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_subject(subject, now, ttl)?;
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;

        Ok(AuthenticationResult {
            access_token,
            token_type: "bearer",
            expires_at,
        })
    }

    /// Validate a token against the current clock.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a token as of `now` (Unix seconds).
    pub fn validate_token_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        self.jwt_handler.decode_at(token, now)
    }
}
