//! Raw session-scoped key-value storage.

use crate::{Result, SessionError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Session-scoped string storage, one instance per browser tab.
///
/// Models the `sessionStorage` contract: string keys, string values,
/// shared by every page load within one tab and dropped when the tab
/// closes. Implementations must be safe to share across the resolver and
/// the context service, which never run concurrently within a tab but may
/// both hold handles.
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory [`SessionStore`].
///
/// Stands in for browser `sessionStorage` in native embeddings, the CLI,
/// and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
    /// Optional quota in total stored bytes; writes beyond it fail the way
    /// a browser quota does.
    quota_bytes: Option<usize>,
}

impl MemorySessionStore {
    /// Creates an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes once `quota_bytes` of
    /// values are held.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if let Some(quota) = self.quota_bytes {
            let held: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if held + value.len() > quota {
                return Err(SessionError::Unavailable(format!(
                    "quota exceeded writing {}",
                    key
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
