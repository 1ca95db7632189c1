//! In-memory routing log with a session-storage mirror.

use crate::RoutingMailbox;
use sgex_types::{now_ms, RoutingEvent, RoutingLogEntry};
use tracing::debug;
use uuid::Uuid;

/// Append-only routing-event log for one page load.
///
/// Entries accumulate in memory and are mirrored to the session store
/// after every append, so a hard navigation does not lose the trail.
/// Entries are never mutated after append; the log is only truncated by
/// the rolling cap.
pub struct RoutingLog {
    session_id: String,
    started_at_ms: u64,
    entries: Vec<RoutingLogEntry>,
    max_entries: usize,
    mailbox: RoutingMailbox,
}

impl RoutingLog {
    /// Starts a log for a new page load, seeded with any entries mirrored
    /// by earlier page loads in the same tab.
    pub fn new(mailbox: RoutingMailbox, max_entries: usize) -> Self {
        let entries = mailbox.routing_log().unwrap_or_default();
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at_ms: now_ms(),
            entries,
            max_entries,
            mailbox,
        }
    }

    /// Records a 404 access.
    pub fn access(&mut self, url: impl Into<String>) {
        self.append(RoutingEvent::Access { url: url.into() });
    }

    /// Records an issued redirect.
    pub fn redirect(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
        attempt: usize,
    ) {
        let chain_length = self.entries.len();
        self.append(RoutingEvent::Redirect {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
            attempt,
            chain_length,
        });
    }

    /// Records a routing failure together with the chain so far.
    pub fn error(&mut self, message: impl Into<String>) {
        let chain = self.chain();
        self.append(RoutingEvent::Error {
            message: message.into(),
            chain,
        });
    }

    /// Records a component being handed to the SPA.
    pub fn component_load(&mut self, component: impl Into<String>) {
        self.append(RoutingEvent::ComponentLoad {
            component: component.into(),
        });
    }

    /// Records a write to a reserved session key.
    pub fn storage_update(&mut self, key: impl Into<String>) {
        self.append(RoutingEvent::SessionStorageUpdate { key: key.into() });
    }

    /// Records which source the page context was resolved from.
    pub fn context_resolution(&mut self, source: impl Into<String>) {
        self.append(RoutingEvent::ContextResolution {
            source: source.into(),
        });
    }

    /// Returns all retained entries, oldest first.
    pub fn entries(&self) -> &[RoutingLogEntry] {
        &self.entries
    }

    /// Returns one-line summaries of the retained entries, for the
    /// terminal diagnostic screen.
    pub fn chain(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.event.summary()).collect()
    }

    /// Returns this page load's session id.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn append(&mut self, event: RoutingEvent) {
        let timestamp_ms = now_ms();
        self.entries.push(RoutingLogEntry {
            session_id: self.session_id.clone(),
            timestamp_ms,
            elapsed_ms: timestamp_ms.saturating_sub(self.started_at_ms),
            event,
        });
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        // Mirror failures cannot themselves be logged to storage.
        if let Err(e) = self.mailbox.put_log(&self.entries) {
            debug!(error = %e, "failed to mirror routing log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySessionStore, SessionStore, LOG_KEY};
    use std::sync::Arc;

    fn log_over(store: Arc<MemorySessionStore>, cap: usize) -> RoutingLog {
        RoutingLog::new(RoutingMailbox::new(store), cap)
    }

    #[test]
    fn test_append_and_chain() {
        let store = Arc::new(MemorySessionStore::new());
        let mut log = log_over(store, 10);
        log.access("/sgex/dashboard");
        log.redirect("/sgex/dashboard", "/sgex/", "landing", 1);
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.chain()[0], "access /sgex/dashboard");
    }

    #[test]
    fn test_rolling_cap_keeps_latest() {
        let store = Arc::new(MemorySessionStore::new());
        let mut log = log_over(store, 3);
        for i in 0..5 {
            log.access(format!("/sgex/{}", i));
        }
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.chain()[2], "access /sgex/4");
    }

    #[test]
    fn test_mirrored_after_every_append() {
        let store = Arc::new(MemorySessionStore::new());
        let mut log = log_over(store.clone(), 10);
        log.access("/sgex/");
        assert!(store.get(LOG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_new_page_load_recovers_mirror() {
        let store = Arc::new(MemorySessionStore::new());
        {
            let mut log = log_over(store.clone(), 10);
            log.access("/sgex/dashboard");
        }
        let recovered = log_over(store, 10);
        assert_eq!(recovered.entries().len(), 1);
    }

    #[test]
    fn test_error_captures_prior_chain() {
        let store = Arc::new(MemorySessionStore::new());
        let mut log = log_over(store, 10);
        log.access("/sgex/x");
        log.error("too many redirects");
        match &log.entries()[1].event {
            RoutingEvent::Error { chain, .. } => {
                assert_eq!(chain.len(), 1);
                assert_eq!(chain[0], "access /sgex/x");
            }
            other => panic!("expected error event, got {:?}", other),
        }
    }

    #[test]
    fn test_quota_failure_does_not_panic() {
        let store = Arc::new(MemorySessionStore::with_quota(4));
        let mut log = log_over(store, 10);
        log.access("/sgex/a-path-long-enough-to-exceed-the-quota");
        assert_eq!(log.entries().len(), 1);
    }
}
