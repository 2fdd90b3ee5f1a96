use async_trait::async_trait;

use crate::domain::identity::errors::AuthorizationError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedSubject;
use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::IdentityRecord;
use crate::domain::identity::models::IssuedToken;
use crate::domain::identity::models::Username;

/// Port for identity operations: registration, login and the authorization gate.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `credentials` - Validated username and plaintext password
    ///
    /// # Returns
    /// The stored identity record
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Storage` - Repository operation failed
    async fn register(&self, credentials: Credentials) -> Result<IdentityRecord, IdentityError>;

    /// Retrieve an identity by username.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this username
    /// * `Storage` - Repository operation failed
    async fn find(&self, username: &Username) -> Result<IdentityRecord, IdentityError>;

    /// Check a username and password pair.
    ///
    /// Unknown usernames cost the same password verification as known ones.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Storage` - Repository operation failed
    async fn verify_credentials(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticatedSubject, IdentityError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `TokenIssuance` - Token signing failed
    /// * `Storage` - Repository operation failed
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, IdentityError>;

    /// Authorization gate: resolve a presented bearer token to its subject.
    ///
    /// # Errors
    /// * `TokenMalformed` - Token cannot be decoded
    /// * `TokenSignatureInvalid` - Signature mismatch or foreign algorithm
    /// * `TokenExpired` - Current time is at or past expiry
    /// * `UnknownSubject` - Subject has no identity record
    async fn authorize(&self, token: &str) -> Result<AuthenticatedSubject, AuthorizationError>;
}

/// Persistence operations for identity records.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Atomically insert a record if its username is absent.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username already present; the store is left unchanged
    /// * `Storage` - Repository operation failed
    async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError>;

    /// Retrieve a record by username.
    ///
    /// # Returns
    /// Optional record (None if not found)
    async fn find(&self, username: &Username) -> Result<Option<IdentityRecord>, IdentityError>;

    /// Check whether a username is registered.
    async fn contains(&self, username: &Username) -> Result<bool, IdentityError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, IdentityError>;
}
