//! Routing-log record types.

use serde::{Deserialize, Serialize};

/// One routing event, tagged by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RoutingEvent {
    /// A URL reached the 404 handler.
    Access {
        /// The URL as observed.
        url: String,
    },
    /// A redirect was issued.
    Redirect {
        /// Path being redirected away from.
        from: String,
        /// Resolved redirect location.
        to: String,
        /// Human-readable reason for the redirect.
        reason: String,
        /// Which attempt at this target this redirect is.
        attempt: usize,
        /// Length of the event chain at the time of the redirect.
        chain_length: usize,
    },
    /// A routing failure worth a postmortem.
    Error {
        /// What went wrong.
        message: String,
        /// Event chain accumulated up to the failure.
        chain: Vec<String>,
    },
    /// A DAK component was handed to the SPA.
    ComponentLoad {
        /// Component identifier.
        component: String,
    },
    /// A session-storage key was written.
    SessionStorageUpdate {
        /// The key that was written.
        key: String,
    },
    /// The context service decided where the page context came from.
    ContextResolution {
        /// Winning source: router params, the persisted context, or none.
        source: String,
    },
}

impl RoutingEvent {
    /// Returns a one-line summary for diagnostic chains.
    pub fn summary(&self) -> String {
        match self {
            Self::Access { url } => format!("access {}", url),
            Self::Redirect {
                from, to, attempt, ..
            } => format!("redirect {} -> {} (attempt {})", from, to, attempt),
            Self::Error { message, .. } => format!("error: {}", message),
            Self::ComponentLoad { component } => format!("component-load {}", component),
            Self::SessionStorageUpdate { key } => format!("session-storage-update {}", key),
            Self::ContextResolution { source } => format!("context-resolution {}", source),
        }
    }
}

/// An append-only diagnostic record of one routing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingLogEntry {
    /// Random identifier shared by all entries of one page load.
    pub session_id: String,
    /// When the event happened (unix millis).
    pub timestamp_ms: u64,
    /// Milliseconds since the session started.
    pub elapsed_ms: u64,
    /// The event itself.
    #[serde(flatten)]
    pub event: RoutingEvent,
}
