use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are reported per verification stage: structure,
/// signature, then expiry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token time-to-live must be positive, got {0} seconds")]
    InvalidTtl(i64),
}
