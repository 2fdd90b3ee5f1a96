use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::identity::errors::PasswordError;
use crate::domain::identity::errors::UsernameError;

/// Stored identity, keyed by username.
///
/// Holds only the password digest, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub username: Username,
    pub password_digest: String,
    pub registered_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn new(username: Username, password_digest: String) -> Self {
        Self {
            username,
            password_digest,
            registered_at: Utc::now(),
        }
    }
}

/// Username value type
///
/// Any non-empty string up to 4 KiB. The username is the identity key, so
/// it is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MAX_BYTES: usize = 4096;

    /// # Errors
    /// * `Empty` - Username is the empty string
    /// * `TooLong` - Username exceeds 4096 bytes
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        if username.len() > Self::MAX_BYTES {
            return Err(UsernameError::TooLong {
                max: Self::MAX_BYTES,
                actual: username.len(),
            });
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password, consumed by the hashing or verification call.
///
/// Not `Clone`; `Debug` output is redacted. The empty string is a valid
/// password; only the size is bounded, since every byte goes through Argon2.
pub struct Password(String);

impl Password {
    pub const MAX_BYTES: usize = 4096;

    /// # Errors
    /// * `TooLong` - Password exceeds 4096 bytes
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.len() > Self::MAX_BYTES {
            return Err(PasswordError::TooLong {
                max: Self::MAX_BYTES,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Transient login or registration input.
#[derive(Debug)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

impl Credentials {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Marker produced by the authorization gate for a resolved token subject.
///
/// Only the gate constructs it outside of this crate's tests, so holding one
/// proves the caller passed authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    username: Username,
}

impl AuthenticatedSubject {
    pub(crate) fn new(username: Username) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Bearer token handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<auth::AuthenticationResult> for IssuedToken {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
            expires_at: result.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_arbitrary_strings() {
        for raw in ["al", "alice smith", "bob@example.com", "ünïcødé", "x"] {
            let username = Username::new(raw.to_string()).unwrap();
            assert_eq!(username.as_str(), raw);
        }
    }

    #[test]
    fn test_username_bounds() {
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
        assert!(Username::new("a".repeat(Username::MAX_BYTES)).is_ok());
        assert_eq!(
            Username::new("a".repeat(Username::MAX_BYTES + 1)),
            Err(UsernameError::TooLong {
                max: 4096,
                actual: 4097
            })
        );
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(Password::new(String::new()).unwrap().expose(), "");
        assert_eq!(Password::new("x".repeat(200)).unwrap().expose().len(), 200);
        assert!(Password::new("x".repeat(Password::MAX_BYTES)).is_ok());
        assert_eq!(
            Password::new("x".repeat(Password::MAX_BYTES + 1)).unwrap_err(),
            PasswordError::TooLong { max: 4096 }
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        let rendered = format!("{:?}", password);
        assert!(!rendered.contains("hunter2"));
    }
}
