use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::identity::errors::AuthorizationError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedSubject;
use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::IdentityRecord;
use crate::domain::identity::models::IssuedToken;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::CredentialRepository;
use crate::domain::identity::ports::IdentityServicePort;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Domain service implementation for identity operations.
///
/// Password hashing and verification run on the blocking thread pool.
pub struct IdentityService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
    dummy_digest: String,
}

impl<CR> IdentityService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password hasher and token signer
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `Hashing` - The digest used for unknown users could not be computed
    pub fn new(
        repository: Arc<CR>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Result<Self, IdentityError> {
        let dummy_digest = authenticator.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            repository,
            authenticator,
            token_ttl,
            dummy_digest,
        })
    }

    /// Authorization gate evaluated at an explicit instant (Unix seconds).
    pub async fn authorize_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AuthenticatedSubject, AuthorizationError> {
        let claims = self.authenticator.validate_token_at(token, now)?;

        // A signed subject that is not a valid username can never be registered
        let username = Username::new(claims.sub.clone())
            .map_err(|_| AuthorizationError::UnknownSubject(claims.sub))?;

        let exists = self
            .repository
            .contains(&username)
            .await
            .map_err(|e| AuthorizationError::Storage(e.to_string()))?;

        if !exists {
            return Err(AuthorizationError::UnknownSubject(username.to_string()));
        }

        Ok(AuthenticatedSubject::new(username))
    }

    async fn hash_password(&self, password: Password) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);

        let digest =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await??;

        Ok(digest)
    }

    async fn verify_password(
        &self,
        password: Password,
        digest: String,
    ) -> Result<bool, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);

        let matches = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.expose(), &digest)
        })
        .await?;

        Ok(matches)
    }

    /// Spend one verification against the dummy digest so that unknown
    /// usernames fail no faster than wrong passwords.
    async fn reject_unknown_user(&self, password: Password) -> IdentityError {
        match self
            .verify_password(password, self.dummy_digest.clone())
            .await
        {
            Ok(_) => IdentityError::InvalidCredentials,
            Err(e) => e,
        }
    }
}

#[async_trait]
impl<CR> IdentityServicePort for IdentityService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<IdentityRecord, IdentityError> {
        let Credentials { username, password } = credentials;

        // Skip the expensive hash for obvious duplicates; insert stays authoritative
        if self.repository.contains(&username).await? {
            return Err(IdentityError::DuplicateUser(username.to_string()));
        }

        let password_digest = self.hash_password(password).await?;
        let record = IdentityRecord::new(username, password_digest);

        self.repository.insert(record.clone()).await?;
        tracing::info!(username = %record.username, "Identity registered");

        Ok(record)
    }

    async fn find(&self, username: &Username) -> Result<IdentityRecord, IdentityError> {
        self.repository
            .find(username)
            .await?
            .ok_or(IdentityError::NotFound(username.to_string()))
    }

    async fn verify_credentials(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticatedSubject, IdentityError> {
        let Credentials { username, password } = credentials;

        let Some(record) = self.repository.find(&username).await? else {
            tracing::debug!(username = %username, "Credentials for unknown user");
            return Err(self.reject_unknown_user(password).await);
        };

        if self.verify_password(password, record.password_digest).await? {
            Ok(AuthenticatedSubject::new(username))
        } else {
            Err(IdentityError::InvalidCredentials)
        }
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, IdentityError> {
        let subject = self.verify_credentials(credentials).await?;

        let authenticator = Arc::clone(&self.authenticator);
        let username = subject.username().clone();
        let ttl = self.token_ttl;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.issue_token(username.as_str(), ttl)
        })
        .await??;

        tracing::info!(
            username = %subject.username(),
            expires_at = %result.expires_at,
            "Token issued"
        );

        Ok(result.into())
    }

    async fn authorize(&self, token: &str) -> Result<AuthenticatedSubject, AuthorizationError> {
        self.authorize_at(token, Utc::now().timestamp()).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::outbound::repositories::InMemoryCredentialRepository;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestCredentialRepository {}

        #[async_trait]
        impl CredentialRepository for TestCredentialRepository {
            async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError>;
            async fn find(&self, username: &Username) -> Result<Option<IdentityRecord>, IdentityError>;
            async fn contains(&self, username: &Username) -> Result<bool, IdentityError>;
            async fn count(&self) -> Result<usize, IdentityError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let hasher = auth::PasswordHasher::with_params(1024, 1, 1).unwrap();
        Arc::new(Authenticator::with_password_hasher(SECRET, hasher))
    }

    fn service<CR: CredentialRepository>(repository: CR) -> IdentityService<CR> {
        IdentityService::new(Arc::new(repository), authenticator(), Duration::seconds(60))
            .expect("Failed to build identity service")
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::new(
            Username::new(username.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_then_verify_credentials() {
        let service = service(InMemoryCredentialRepository::new());

        service.register(credentials("alice", "pw123")).await.unwrap();

        let subject = service
            .verify_credentials(credentials("alice", "pw123"))
            .await
            .unwrap();
        assert_eq!(subject.username().as_str(), "alice");

        let result = service
            .verify_credentials(credentials("alice", "pw123x"))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_stores_salted_digest() {
        let service = service(InMemoryCredentialRepository::new());

        let alice = service.register(credentials("alice", "same")).await.unwrap();
        let bob = service.register(credentials("bob", "same")).await.unwrap();

        assert!(alice.password_digest.starts_with("$argon2id$"));
        assert_ne!(alice.password_digest, "same");
        assert_ne!(alice.password_digest, bob.password_digest);
    }

    #[tokio::test]
    async fn test_register_duplicate_user() {
        let repository = InMemoryCredentialRepository::new();
        let service = service(repository.clone());

        service.register(credentials("alice", "pw123")).await.unwrap();
        let result = service.register(credentials("alice", "other")).await;

        assert!(matches!(result, Err(IdentityError::DuplicateUser(ref u)) if u == "alice"));
        assert_eq!(repository.count().await.unwrap(), 1);

        // The original password still works
        assert!(service
            .verify_credentials(credentials("alice", "pw123"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_skips_hashing() {
        let mut repository = MockTestCredentialRepository::new();
        repository.expect_contains().times(1).returning(|_| Ok(true));
        repository.expect_insert().times(0);

        let result = service(repository)
            .register(credentials("alice", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_register_loses_insert_race() {
        let mut repository = MockTestCredentialRepository::new();
        repository.expect_contains().times(1).returning(|_| Ok(false));
        repository
            .expect_insert()
            .withf(|record| {
                record.username.as_str() == "alice"
                    && record.password_digest.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|record| Err(IdentityError::DuplicateUser(record.username.to_string())));

        let result = service(repository)
            .register(credentials("alice", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::DuplicateUser(_))));
    }

    #[tokio::test]
    async fn test_find() {
        let service = service(InMemoryCredentialRepository::new());
        service.register(credentials("alice", "pw123")).await.unwrap();

        let alice = Username::new("alice".to_string()).unwrap();
        assert_eq!(service.find(&alice).await.unwrap().username, alice);

        let bob = Username::new("bob".to_string()).unwrap();
        assert!(matches!(
            service.find(&bob).await,
            Err(IdentityError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_user() {
        let service = service(InMemoryCredentialRepository::new());

        let result = service
            .verify_credentials(credentials("ghost", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_storage_error() {
        let mut repository = MockTestCredentialRepository::new();
        repository
            .expect_find()
            .times(1)
            .returning(|_| Err(IdentityError::Storage("unavailable".to_string())));

        let result = service(repository)
            .verify_credentials(credentials("alice", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::Storage(_))));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_subject() {
        let service = service(InMemoryCredentialRepository::new());
        service.register(credentials("alice", "pw123")).await.unwrap();

        let token = service.login(credentials("alice", "pw123")).await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let subject = service.authorize(&token.access_token).await.unwrap();
        assert_eq!(subject.username().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user() {
        let service = service(InMemoryCredentialRepository::new());
        service.register(credentials("alice", "pw123")).await.unwrap();

        assert!(matches!(
            service.login(credentials("alice", "wrong")).await,
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login(credentials("nobody", "pw123")).await,
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_user_takes_dummy_verification_path() {
        let mut repository = MockTestCredentialRepository::new();
        repository.expect_find().times(1).returning(|_| Ok(None));

        let result = service(repository)
            .login(credentials("bob@example.com", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_storage_error_issues_nothing() {
        let mut repository = MockTestCredentialRepository::new();
        repository
            .expect_find()
            .times(1)
            .returning(|_| Err(IdentityError::Storage("unavailable".to_string())));

        let result = service(repository)
            .login(credentials("alice", "pw123"))
            .await;
        assert!(matches!(result, Err(IdentityError::Storage(_))));
    }

    #[tokio::test]
    async fn test_authorize_expiry_window() {
        let service = service(InMemoryCredentialRepository::new());
        service.register(credentials("alice", "pw123")).await.unwrap();

        let issued_at = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = authenticator()
            .issue_token_at("alice", Duration::seconds(60), issued_at)
            .unwrap()
            .access_token;

        assert!(service.authorize_at(&token, 1_700_000_000).await.is_ok());
        assert!(service.authorize_at(&token, 1_700_000_059).await.is_ok());
        assert_eq!(
            service.authorize_at(&token, 1_700_000_060).await,
            Err(AuthorizationError::TokenExpired)
        );
    }

    #[tokio::test]
    async fn test_authorize_malformed_token() {
        let service = service(InMemoryCredentialRepository::new());

        let result = service.authorize("not-a-token").await;
        assert!(matches!(result, Err(AuthorizationError::TokenMalformed(_))));
    }

    #[tokio::test]
    async fn test_authorize_foreign_secret() {
        let service = service(InMemoryCredentialRepository::new());
        service.register(credentials("alice", "pw123")).await.unwrap();

        let foreign = Authenticator::new(b"another-secret-key-also-at-least-32-bytes");
        let token = foreign
            .issue_token("alice", Duration::seconds(60))
            .unwrap()
            .access_token;

        assert_eq!(
            service.authorize(&token).await,
            Err(AuthorizationError::TokenSignatureInvalid)
        );
    }

    #[tokio::test]
    async fn test_authorize_unknown_subject() {
        let service = service(InMemoryCredentialRepository::new());

        let token = authenticator()
            .issue_token("ghost", Duration::seconds(60))
            .unwrap()
            .access_token;

        assert_eq!(
            service.authorize(&token).await,
            Err(AuthorizationError::UnknownSubject("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_authorize_invalid_subject_format() {
        let mut repository = MockTestCredentialRepository::new();
        repository.expect_contains().times(0);

        let token = authenticator()
            .issue_token("", Duration::seconds(60))
            .unwrap()
            .access_token;

        assert!(matches!(
            service(repository).authorize(&token).await,
            Err(AuthorizationError::UnknownSubject(_))
        ));
    }
}
