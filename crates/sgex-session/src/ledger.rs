//! Redirect-attempt bookkeeping for loop prevention.

use serde::{Deserialize, Serialize};

/// One recorded resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectAttempt {
    /// Resolved redirect target path.
    pub path: String,
    /// When the attempt was made (unix millis).
    pub at_ms: u64,
}

/// The list of recent resolution attempts, persisted per tab session.
///
/// Entries outside the trailing window are pruned on every read, so the
/// ledger never grows past a few entries in practice and the attempt
/// count resets once attempts are spaced beyond the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectAttemptLedger {
    entries: Vec<RedirectAttempt>,
}

impl RedirectAttemptLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops entries older than `window_ms` at `now_ms`, then counts the
    /// remaining attempts targeting `target`.
    pub fn prune_and_count(&mut self, now_ms: u64, window_ms: u64, target: &str) -> usize {
        self.entries
            .retain(|e| now_ms.saturating_sub(e.at_ms) <= window_ms);
        self.entries.iter().filter(|e| e.path == target).count()
    }

    /// Records an attempt targeting `target` at `now_ms`.
    pub fn record(&mut self, target: impl Into<String>, now_ms: u64) {
        self.entries.push(RedirectAttempt {
            path: target.into(),
            at_ms: now_ms,
        });
    }

    /// Returns the recorded attempts, oldest first.
    pub fn entries(&self) -> &[RedirectAttempt] {
        &self.entries
    }

    /// Returns the number of recorded attempts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_only_matching_target() {
        let mut ledger = RedirectAttemptLedger::new();
        ledger.record("/sgex/", 100);
        ledger.record("/sgex/main/", 110);
        ledger.record("/sgex/", 120);
        assert_eq!(ledger.prune_and_count(130, 30_000, "/sgex/"), 2);
    }

    #[test]
    fn test_prune_drops_old_entries() {
        let mut ledger = RedirectAttemptLedger::new();
        ledger.record("/sgex/", 0);
        ledger.record("/sgex/", 40_000);
        assert_eq!(ledger.prune_and_count(50_000, 30_000, "/sgex/"), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let mut ledger = RedirectAttemptLedger::new();
        ledger.record("/sgex/", 10_000);
        assert_eq!(ledger.prune_and_count(40_000, 30_000, "/sgex/"), 1);
        assert_eq!(ledger.prune_and_count(40_001, 30_000, "/sgex/"), 0);
    }

    #[test]
    fn test_attempts_spaced_beyond_window_reset_count() {
        let mut ledger = RedirectAttemptLedger::new();
        let mut now = 0;
        for _ in 0..7 {
            ledger.record("/sgex/", now);
            now += 31_000;
        }
        // Every earlier attempt has aged out by the time of the check.
        assert_eq!(ledger.prune_and_count(now, 30_000, "/sgex/"), 0);
    }
}
