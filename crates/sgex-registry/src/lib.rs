//! Route configuration for the SGeX routing subsystem.
//!
//! Supplies the authoritative set of known DAK component identifiers to
//! the redirect resolver and the SPA route table, and the
//! session-restoration accessor the SPA uses at bootstrap.

mod error;
mod registry;
mod restore;

pub use error::RegistryError;
pub use registry::{ComponentEntry, ComponentRegistry, FALLBACK_COMPONENTS};
pub use restore::try_restore_context;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
