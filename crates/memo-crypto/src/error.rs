//! Error types for cryptographic operations.

use thiserror::Error;

/// Result type alias for cryptographic operations.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;

/// Cryptographic operation errors.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Stored hash is not a parsable PHC string.
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),

    /// Password is empty.
    #[error("Password must not be empty")]
    EmptyPassword,
}
