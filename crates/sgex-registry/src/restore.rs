//! Session-context restoration.

use sgex_session::{RoutingMailbox, SessionError};
use sgex_types::{now_ms, NavigationalContext, RoutingConfig};
use tracing::{debug, error, warn};

/// Reads the context persisted by the redirect resolver, if it is still
/// fresh.
///
/// Stale (TTL-expired) and corrupt entries are cleared and treated as
/// absent; callers never see an error from this accessor.
pub fn try_restore_context(
    mailbox: &RoutingMailbox,
    config: &RoutingConfig,
) -> Option<NavigationalContext> {
    match mailbox.context() {
        Ok(Some(context)) => {
            if context.is_stale(now_ms(), config.context_ttl_ms) {
                warn!(
                    age_ms = now_ms().saturating_sub(context.timestamp_ms),
                    "persisted navigational context expired, discarding"
                );
                let _ = mailbox.clear_context();
                return None;
            }
            debug!(original_url = %context.original_url, "restored navigational context");
            Some(context)
        }
        Ok(None) => None,
        Err(e @ SessionError::Corrupt { .. }) => {
            error!(error = %e, "persisted navigational context unreadable, discarding");
            let _ = mailbox.clear_context();
            None
        }
        Err(e) => {
            error!(error = %e, "session storage unavailable during restoration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgex_session::{MemorySessionStore, SessionStore, CONTEXT_KEY};
    use std::sync::Arc;

    fn mailbox_with_store() -> (RoutingMailbox, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (RoutingMailbox::new(store.clone()), store)
    }

    #[test]
    fn test_restores_fresh_context() {
        let (mailbox, _) = mailbox_with_store();
        let ctx = NavigationalContext::new("/sgex/dashboard", "", "", now_ms())
            .with_component("dashboard");
        mailbox.put_context(&ctx).unwrap();
        let restored = try_restore_context(&mailbox, &RoutingConfig::default());
        assert_eq!(restored, Some(ctx));
    }

    #[test]
    fn test_absent_context_is_none() {
        let (mailbox, _) = mailbox_with_store();
        assert!(try_restore_context(&mailbox, &RoutingConfig::default()).is_none());
    }

    #[test]
    fn test_stale_context_cleared() {
        let (mailbox, _) = mailbox_with_store();
        // Six minutes old with a five-minute TTL.
        let ctx = NavigationalContext::new(
            "/sgex/dashboard",
            "",
            "",
            now_ms().saturating_sub(6 * 60 * 1000),
        );
        mailbox.put_context(&ctx).unwrap();
        assert!(try_restore_context(&mailbox, &RoutingConfig::default()).is_none());
        // Cleared, not just skipped.
        assert_eq!(mailbox.context().unwrap(), None);
    }

    #[test]
    fn test_corrupt_context_cleared() {
        let (mailbox, store) = mailbox_with_store();
        store.set(CONTEXT_KEY, "not json at all").unwrap();
        assert!(try_restore_context(&mailbox, &RoutingConfig::default()).is_none());
        assert_eq!(store.get(CONTEXT_KEY).unwrap(), None);
    }
}
