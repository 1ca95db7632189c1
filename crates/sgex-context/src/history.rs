//! History-API seam.

use parking_lot::RwLock;

/// The one way this subsystem may mutate the visible URL.
///
/// Implementations must replace the current history entry without
/// navigating (the browser `history.replaceState` contract); pushing a
/// new entry would leave the marker-bearing URL in back-history.
pub trait HistoryApi: Send + Sync {
    /// Replaces the current history entry's URL.
    fn replace_url(&self, url: &str);
}

/// [`HistoryApi`] that records every replacement, for tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingHistory {
    replaced: RwLock<Vec<String>>,
}

impl RecordingHistory {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent replacement, if any.
    pub fn last(&self) -> Option<String> {
        self.replaced.read().last().cloned()
    }

    /// Returns every recorded replacement, oldest first.
    pub fn all(&self) -> Vec<String> {
        self.replaced.read().clone()
    }
}

impl HistoryApi for RecordingHistory {
    fn replace_url(&self, url: &str) {
        self.replaced.write().push(url.to_string());
    }
}
