use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a PHC string this hasher can verify against.
    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}
