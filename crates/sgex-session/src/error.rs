//! Session-storage error types.

use thiserror::Error;

/// Errors that can occur when touching session-scoped storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing store refused the operation (quota exceeded, storage
    /// disabled, or similar).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// A stored value failed to decode as the expected type.
    #[error("corrupt session entry for {key}: {message}")]
    Corrupt {
        /// The key whose value failed to decode.
        key: String,
        /// Decoder error text.
        message: String,
    },

    /// A value failed to encode for storage.
    #[error("failed to encode session entry: {0}")]
    Encode(#[from] serde_json::Error),
}
