//! The 404-handler resolution pipeline.

use crate::{build_redirect_location, classify_path};
use serde::Serialize;
use sgex_registry::ComponentRegistry;
use sgex_session::{RoutingLog, RoutingMailbox, CONTEXT_KEY, LEDGER_KEY};
use sgex_types::{now_ms, DeploymentPolicy, NavigationalContext, OptimisticPolicy, UrlParts};
use tracing::{error, info};

/// Outcome of one 404-triggered resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Resolution {
    /// Redirect to `location` with replace semantics.
    Redirect {
        /// The fully constructed redirect location.
        location: String,
        /// The context persisted for the next page load.
        context: NavigationalContext,
    },
    /// The loop ceiling was hit; render a terminal diagnostic instead of
    /// redirecting again.
    LoopDetected {
        /// The target that kept being resolved.
        target: String,
        /// Recent attempts at that target within the window.
        attempts: usize,
        /// Routing-event chain for the diagnostic screen.
        chain: Vec<String>,
    },
}

/// The redirect resolver: entry point for any path the static host could
/// not serve.
///
/// Owns the session mailbox and routing log for the 404 page load. All
/// session-store writes complete before a [`Resolution::Redirect`] is
/// returned, so the next page load always observes them; storage
/// failures are logged and tolerated because navigation must not hang.
pub struct RedirectResolver {
    registry: ComponentRegistry,
    policy: Box<dyn DeploymentPolicy>,
    mailbox: RoutingMailbox,
    log: RoutingLog,
}

impl RedirectResolver {
    /// Creates a resolver with the optimistic deployment policy.
    pub fn new(registry: ComponentRegistry, mailbox: RoutingMailbox) -> Self {
        let log = RoutingLog::new(mailbox.clone(), registry.config().max_log_entries);
        Self {
            registry,
            policy: Box::new(OptimisticPolicy),
            mailbox,
            log,
        }
    }

    /// Replaces the deployment policy.
    pub fn with_policy(mut self, policy: Box<dyn DeploymentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves one observed location into a redirect or a terminal
    /// diagnostic.
    pub fn resolve(&mut self, parts: &UrlParts) -> Resolution {
        let config = self.registry.config().clone();
        let original = parts.to_relative();
        self.log.access(&original);

        let parse = classify_path(&parts.pathname, &self.registry, self.policy.as_ref());
        let context = parse.to_context(parts, now_ms());
        let target_path = parse.target.entry_path(&config.site_root);

        // Loop check comes first; a saturated target must not be
        // redirected to again, whatever else this resolution would do.
        let mut ledger = match self.mailbox.ledger() {
            Ok(ledger) => ledger,
            Err(e) => {
                error!(error = %e, "ledger read failed");
                self.log.error(format!("ledger read failed: {}", e));
                Default::default()
            }
        };
        let attempts = ledger.prune_and_count(now_ms(), config.loop_window_ms, &target_path);
        if attempts >= config.redirect_ceiling {
            error!(
                target = %target_path,
                attempts,
                ceiling = config.redirect_ceiling,
                "redirect loop detected"
            );
            self.log.error(format!(
                "too many redirects to {} ({} attempts within {}ms)",
                target_path, attempts, config.loop_window_ms
            ));
            return Resolution::LoopDetected {
                target: target_path,
                attempts,
                chain: self.log.chain(),
            };
        }

        ledger.record(&target_path, now_ms());
        match self.mailbox.put_ledger(&ledger) {
            Ok(()) => self.log.storage_update(LEDGER_KEY),
            Err(e) => {
                error!(error = %e, "ledger write failed");
                self.log.error(format!("ledger write failed: {}", e));
            }
        }
        match self.mailbox.put_context(&context) {
            Ok(()) => self.log.storage_update(CONTEXT_KEY),
            Err(e) => {
                error!(error = %e, "context write failed");
                self.log.error(format!("context write failed: {}", e));
            }
        }

        let location = build_redirect_location(
            &target_path,
            &parts.pathname,
            &parts.search,
            &parts.hash,
            &config.marker_param,
        );
        let reason = match parse.target.branch() {
            Some(branch) => format!("branch deployment {}", branch),
            None => "landing deployment".to_string(),
        };
        info!(from = %original, to = %location, attempt = attempts + 1, "redirecting");
        self.log
            .redirect(&parts.pathname, &location, reason, attempts + 1);

        Resolution::Redirect { location, context }
    }

    /// Returns the routing log accumulated by this resolver.
    pub fn log(&self) -> &RoutingLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgex_session::{MemorySessionStore, SessionStore};
    use std::sync::Arc;

    fn resolver_over(store: Arc<MemorySessionStore>) -> RedirectResolver {
        RedirectResolver::new(
            ComponentRegistry::fallback(),
            RoutingMailbox::new(store),
        )
    }

    fn resolve(resolver: &mut RedirectResolver, url: &str) -> Resolution {
        resolver.resolve(&UrlParts::parse(url))
    }

    #[test]
    fn test_landing_style_deep_link() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store.clone());
        let resolution = resolve(&mut resolver, "/sgex/dashboard/who/anc-dak");
        match resolution {
            Resolution::Redirect { location, context } => {
                assert_eq!(
                    location,
                    "/sgex/?sgex_route=%2Fsgex%2Fdashboard%2Fwho%2Fanc-dak"
                );
                assert_eq!(context.component.as_deref(), Some("dashboard"));
                assert_eq!(context.user.as_deref(), Some("who"));
                assert_eq!(context.repo.as_deref(), Some("anc-dak"));
                assert_eq!(context.deployment_branch, None);
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        // Context was persisted before the resolution was returned.
        let mailbox = RoutingMailbox::new(store);
        assert!(mailbox.context().unwrap().is_some());
        assert_eq!(mailbox.ledger().unwrap().len(), 1);
    }

    #[test]
    fn test_branch_deployment_deep_link() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store);
        let resolution = resolve(
            &mut resolver,
            "/sgex/feature-123/dashboard/who/anc-dak/main?debug=true#section2",
        );
        match resolution {
            Resolution::Redirect { location, context } => {
                assert!(location.starts_with("/sgex/feature-123/?sgex_route="));
                assert!(location.contains("debug=true"));
                assert!(location.ends_with("#section2"));
                assert_eq!(context.deployment_branch.as_deref(), Some("feature-123"));
                assert_eq!(context.component.as_deref(), Some("dashboard"));
                assert_eq!(context.branch.as_deref(), Some("main"));
            }
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_single_segment_gets_bare_marker() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store);
        match resolve(&mut resolver, "/sgex/who") {
            Resolution::Redirect { location, context } => {
                assert_eq!(location, "/sgex/?sgex_route=%2Fsgex%2Fwho");
                assert_eq!(context.component, None);
                assert_eq!(context.user, None);
                assert_eq!(context.repo, None);
            }
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_ceiling_blocks_eighth_attempt() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store);
        for _ in 0..7 {
            match resolve(&mut resolver, "/sgex/dashboard") {
                Resolution::Redirect { .. } => {}
                other => panic!("expected redirect, got {:?}", other),
            }
        }
        match resolve(&mut resolver, "/sgex/dashboard") {
            Resolution::LoopDetected {
                target,
                attempts,
                chain,
            } => {
                assert_eq!(target, "/sgex/");
                assert_eq!(attempts, 7);
                assert!(!chain.is_empty());
            }
            other => panic!("expected loop detection, got {:?}", other),
        }
    }

    #[test]
    fn test_different_targets_do_not_share_the_ceiling() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store);
        for _ in 0..7 {
            resolve(&mut resolver, "/sgex/dashboard");
        }
        // A branch-deployment target resolves to a different entry path.
        match resolve(&mut resolver, "/sgex/feature-9/dashboard") {
            Resolution::Redirect { .. } => {}
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_failure_does_not_block_redirect() {
        // A quota of zero makes every write fail.
        let store = Arc::new(MemorySessionStore::with_quota(0));
        let mut resolver = resolver_over(store.clone());
        match resolve(&mut resolver, "/sgex/dashboard/who/anc-dak") {
            Resolution::Redirect { location, .. } => {
                assert!(location.contains("sgex_route="));
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        assert!(store.get(CONTEXT_KEY).unwrap().is_none());
        // Both failed writes leave error entries in the routing log.
        let chain = resolver.log().chain();
        assert!(chain.iter().any(|s| s.contains("ledger write failed")));
        assert!(chain.iter().any(|s| s.contains("context write failed")));
    }

    #[test]
    fn test_resolution_serializes_tagged() {
        let store = Arc::new(MemorySessionStore::new());
        let mut resolver = resolver_over(store);
        let resolution = resolve(&mut resolver, "/sgex/");
        let json = serde_json::to_string(&resolution).unwrap();
        assert!(json.contains(r#""outcome":"redirect""#));
    }
}
