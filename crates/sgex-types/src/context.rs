//! Navigational context extracted from an incoming URL.

use serde::{Deserialize, Serialize};

/// The resolved meaning of an incoming URL.
///
/// Created fresh by the redirect resolver on every 404-triggered
/// resolution and persisted to the tab-session store; read and cleared
/// only by the routing context service in the subsequently loaded page.
///
/// Invariants: `component`, when set, was validated against the component
/// registry at resolution time; `user` and `repo` are both present or
/// both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationalContext {
    /// Creation time (unix millis), used for staleness checks.
    pub timestamp_ms: u64,
    /// The full URL as first observed by the resolver, for diagnostics.
    pub original_url: String,
    /// Raw query string at time of capture, including the leading `?`
    /// when non-empty.
    pub search: String,
    /// Raw fragment at time of capture, including the leading `#` when
    /// non-empty.
    pub hash: String,
    /// Branch whose static deployment should serve this request, or
    /// `None` for the landing deployment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_branch: Option<String>,
    /// Identified DAK component, validated against the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// GitHub organization or user implied by the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// GitHub repository implied by the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Content branch implied by the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl NavigationalContext {
    /// Creates a context with no DAK selection.
    pub fn new(
        original_url: impl Into<String>,
        search: impl Into<String>,
        hash: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            timestamp_ms,
            original_url: original_url.into(),
            search: search.into(),
            hash: hash.into(),
            deployment_branch: None,
            component: None,
            user: None,
            repo: None,
            branch: None,
        }
    }

    /// Sets the deployment branch.
    pub fn with_deployment_branch(mut self, branch: impl Into<String>) -> Self {
        self.deployment_branch = Some(branch.into());
        self
    }

    /// Sets the DAK component.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Sets the user/repo pair.
    pub fn with_repository(mut self, user: impl Into<String>, repo: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.repo = Some(repo.into());
        self
    }

    /// Sets the content branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Returns true if this context is older than `ttl_ms` at `now_ms`.
    pub fn is_stale(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp_ms) > ttl_ms
    }

    /// Returns true if the context identifies a DAK repository.
    pub fn has_repository(&self) -> bool {
        self.user.is_some() && self.repo.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staleness() {
        let ctx = NavigationalContext::new("/sgex/dashboard", "", "", 1_000);
        assert!(!ctx.is_stale(1_000 + 300_000, 300_000));
        assert!(ctx.is_stale(1_000 + 300_001, 300_000));
    }

    #[test]
    fn test_staleness_clock_skew() {
        // A context from the "future" is not stale.
        let ctx = NavigationalContext::new("/sgex/", "", "", 10_000);
        assert!(!ctx.is_stale(5_000, 300_000));
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let ctx = NavigationalContext::new("/sgex/", "", "", 0);
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(!json.contains("component"));
        assert!(!json.contains("deploymentBranch"));
    }

    #[test]
    fn test_json_roundtrip_with_selection() {
        let ctx = NavigationalContext::new("/sgex/dashboard/who/anc-dak", "", "#top", 42)
            .with_component("dashboard")
            .with_repository("who", "anc-dak")
            .with_branch("main");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: NavigationalContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
