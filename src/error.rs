//! Error types for the OpenTok SDK

use thiserror::Error;

/// Errors surfaced by token generation and session validation
#[derive(Debug, Error)]
pub enum OpenTokError {
    /// Caller-supplied data failed a local invariant: malformed session id,
    /// session/account mismatch, expiry outside the allowed window,
    /// oversized connection data, or an unrecognized role.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying signing primitive could not complete. A failed
    /// signature aborts token production; there is no unsigned fallback.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, OpenTokError>;
