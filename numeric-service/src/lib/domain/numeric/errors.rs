use thiserror::Error;

/// Payload validation failures of the numeric operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("{operation} requires at least one number")]
    EmptySequence { operation: &'static str },

    #[error("{operation} overflowed the 64-bit integer range")]
    Overflow { operation: &'static str },
}
