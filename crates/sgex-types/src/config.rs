//! Routing subsystem configuration.

use serde::{Deserialize, Serialize};

/// Configuration for URL resolution and context restoration.
///
/// Every timing window and ceiling the subsystem enforces lives here so
/// that none of them is a literal at a use site. Values deserialize from
/// the same JSON resource as the component list; missing fields take the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    /// First path segment of every URL served by the site (without slashes).
    pub site_root: String,
    /// Reserved query parameter that carries the originally-requested path
    /// through a 404-triggered redirect. Always stripped before the SPA
    /// reads the query string.
    pub marker_param: String,
    /// Persisted navigational context older than this is treated as absent.
    pub context_ttl_ms: u64,
    /// Trailing window over which redirect attempts to the same target
    /// count toward the loop ceiling.
    pub loop_window_ms: u64,
    /// Maximum redirect attempts to one target within the window before
    /// resolution refuses to redirect again.
    pub redirect_ceiling: usize,
    /// Rolling cap on retained routing-log entries.
    pub max_log_entries: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            site_root: "sgex".to_string(),
            marker_param: "sgex_route".to_string(),
            context_ttl_ms: 5 * 60 * 1000,
            loop_window_ms: 30 * 1000,
            redirect_ceiling: 7,
            max_log_entries: 200,
        }
    }
}
