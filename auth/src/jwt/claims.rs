use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Signed claim set carried by an access token.
///
/// Every field is required and unknown fields are rejected on decode.
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, valid for `ttl` from `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Authenticated subject
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Time-to-live, must be at least one second
    ///
    /// # Errors
    /// * `InvalidTtl` - `ttl` is zero or negative
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let ttl_seconds = ttl.num_seconds();
        if ttl_seconds <= 0 {
            return Err(JwtError::InvalidTtl(ttl_seconds));
        }

        let iat = issued_at.timestamp();

        Ok(Self {
            sub: subject.to_string(),
            iat,
            exp: iat + ttl_seconds,
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is valid for `iat <= now < exp`.
    pub fn is_expired_at(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
