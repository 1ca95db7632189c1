//! Typed access to the reserved routing keys.

use crate::{RedirectAttemptLedger, Result, SessionError, SessionStore};
use sgex_types::{NavigationalContext, RoutingLogEntry};
use std::sync::Arc;
use tracing::warn;

/// Key under which the resolver persists the navigational context.
pub const CONTEXT_KEY: &str = "sgex:navigational-context";
/// Key under which the redirect-attempt ledger is persisted.
pub const LEDGER_KEY: &str = "sgex:redirect-attempts";
/// Key under which the routing log is mirrored.
pub const LOG_KEY: &str = "sgex:routing-log";

/// The single point through which the reserved routing keys are read and
/// written.
///
/// The resolver is the only writer of the context; the context service is
/// its only reader. Keeping every access here means the JSON round-trips
/// are validated in one place and no other code touches the key
/// namespace.
#[derive(Clone)]
pub struct RoutingMailbox {
    store: Arc<dyn SessionStore>,
}

impl RoutingMailbox {
    /// Creates a mailbox over `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Persists the navigational context.
    pub fn put_context(&self, context: &NavigationalContext) -> Result<()> {
        let encoded = serde_json::to_string(context)?;
        self.store.set(CONTEXT_KEY, &encoded)
    }

    /// Reads the persisted navigational context.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`SessionError::Corrupt`] when the stored value fails to decode;
    /// the caller decides whether to clear it.
    pub fn context(&self) -> Result<Option<NavigationalContext>> {
        match self.store.get(CONTEXT_KEY)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SessionError::Corrupt {
                    key: CONTEXT_KEY.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    /// Removes the persisted navigational context.
    pub fn clear_context(&self) -> Result<()> {
        self.store.remove(CONTEXT_KEY)
    }

    /// Reads the redirect-attempt ledger.
    ///
    /// An absent or undecodable ledger yields an empty one; loop
    /// prevention must keep working even if the stored value was damaged.
    pub fn ledger(&self) -> Result<RedirectAttemptLedger> {
        match self.store.get(LEDGER_KEY)? {
            None => Ok(RedirectAttemptLedger::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(ledger) => Ok(ledger),
                Err(e) => {
                    warn!(error = %e, "discarding undecodable redirect ledger");
                    Ok(RedirectAttemptLedger::new())
                }
            },
        }
    }

    /// Persists the redirect-attempt ledger.
    pub fn put_ledger(&self, ledger: &RedirectAttemptLedger) -> Result<()> {
        let encoded = serde_json::to_string(ledger)?;
        self.store.set(LEDGER_KEY, &encoded)
    }

    /// Mirrors the routing log.
    pub fn put_log(&self, entries: &[RoutingLogEntry]) -> Result<()> {
        let encoded = serde_json::to_string(entries)?;
        self.store.set(LOG_KEY, &encoded)
    }

    /// Reads the mirrored routing log, e.g. after a hard navigation.
    ///
    /// An absent or undecodable mirror yields an empty log.
    pub fn routing_log(&self) -> Result<Vec<RoutingLogEntry>> {
        match self.store.get(LOG_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!(error = %e, "discarding undecodable routing log mirror");
                    Ok(Vec::new())
                }
            },
        }
    }
}
