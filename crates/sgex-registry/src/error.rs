//! Registry error types.

use thiserror::Error;

/// Errors that can occur while loading route configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The configuration resource could not be read.
    #[error("failed to read route configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration resource is not valid JSON of the expected shape.
    #[error("malformed route configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
