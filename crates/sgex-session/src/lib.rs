//! Tab-session storage for the SGeX routing subsystem.
//!
//! The static 404 handler and the subsequently loaded SPA run in separate
//! page loads; the only channel between them is session-scoped storage.
//! This crate wraps that channel behind one typed mailbox so every read
//! and write of the reserved keys is centrally validated, and provides
//! the redirect-attempt ledger and routing-event log that live in the
//! same store.

mod error;
mod ledger;
mod log;
mod mailbox;
mod store;

pub use error::SessionError;
pub use ledger::{RedirectAttempt, RedirectAttemptLedger};
pub use log::RoutingLog;
pub use mailbox::{RoutingMailbox, CONTEXT_KEY, LEDGER_KEY, LOG_KEY};
pub use store::{MemorySessionStore, SessionStore};

/// Result type for session-storage operations.
pub type Result<T> = std::result::Result<T, SessionError>;
