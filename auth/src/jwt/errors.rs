use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are split by cause so callers can tell a forged
/// token from a stale one. None of them carry transport semantics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
