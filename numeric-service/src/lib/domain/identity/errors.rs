use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Password policy failures. Never carries the password itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password too long: maximum {max} bytes")]
    TooLong { max: usize },
}

/// Top-level error for registration and login
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(#[from] auth::JwtError),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<tokio::task::JoinError> for IdentityError {
    fn from(err: tokio::task::JoinError) -> Self {
        IdentityError::Unknown(format!("Blocking task failed: {}", err))
    }
}

/// Rejection reasons of the authorization gate.
///
/// Distinguished internally for diagnostics; the HTTP boundary collapses
/// all of them into a single unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing token")]
    MissingToken,

    #[error("Token malformed: {0}")]
    TokenMalformed(String),

    #[error("Token signature invalid")]
    TokenSignatureInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthorizationError {
    /// Verification stage that rejected the token, for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            AuthorizationError::MissingToken => "presented",
            AuthorizationError::TokenMalformed(_) => "parsed",
            AuthorizationError::TokenSignatureInvalid => "signature",
            AuthorizationError::TokenExpired => "expiry",
            AuthorizationError::UnknownSubject(_) | AuthorizationError::Storage(_) => "subject",
        }
    }
}

impl From<auth::JwtError> for AuthorizationError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::SignatureInvalid => AuthorizationError::TokenSignatureInvalid,
            auth::JwtError::Expired => AuthorizationError::TokenExpired,
            other => AuthorizationError::TokenMalformed(other.to_string()),
        }
    }
}
