//! Path-shape classification.

use sgex_registry::ComponentRegistry;
use sgex_types::{DeploymentPolicy, DeploymentTarget, NavigationalContext, UrlParts};
use tracing::debug;

/// The structured reading of one pathname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParse {
    /// Which deployment should serve the request.
    pub target: DeploymentTarget,
    /// Identified DAK component, validated against the registry.
    pub component: Option<String>,
    /// GitHub organization or user.
    pub user: Option<String>,
    /// GitHub repository.
    pub repo: Option<String>,
    /// Content branch.
    pub branch: Option<String>,
}

impl RouteParse {
    fn landing() -> Self {
        Self {
            target: DeploymentTarget::Landing,
            component: None,
            user: None,
            repo: None,
            branch: None,
        }
    }

    /// Builds the navigational context this parse implies for `parts`.
    pub fn to_context(&self, parts: &UrlParts, now_ms: u64) -> NavigationalContext {
        let mut context = NavigationalContext::new(
            parts.to_relative(),
            parts.search.clone(),
            parts.hash.clone(),
            now_ms,
        );
        context.deployment_branch = self.target.branch().map(str::to_string);
        context.component = self.component.clone();
        context.user = self.user.clone();
        context.repo = self.repo.clone();
        context.branch = self.branch.clone();
        context
    }
}

/// Classifies `pathname` into a deployment target and DAK context.
///
/// After the fixed site-root segment, the shape is decided by the first
/// remaining segment: a known component identifier means a
/// landing-page-style path (`/<root>/<component>/<user>/<repo>/<branch>`),
/// anything else is offered to the deployment policy as a branch name,
/// shifting the component window right by one. Classification never
/// fails; unreadable shapes degrade to a context-free landing parse.
pub fn classify_path(
    pathname: &str,
    registry: &ComponentRegistry,
    policy: &dyn DeploymentPolicy,
) -> RouteParse {
    let site_root = registry.config().site_root.as_str();
    let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    let rest = match segments.first() {
        Some(first) if *first == site_root => &segments[1..],
        _ => &segments[..],
    };

    let Some(&head) = rest.first() else {
        return RouteParse::landing();
    };

    let mut parse = if registry.is_known_component(head) {
        RouteParse {
            target: DeploymentTarget::Landing,
            component: Some(head.to_string()),
            user: rest.get(1).map(|s| s.to_string()),
            repo: rest.get(2).map(|s| s.to_string()),
            branch: rest.get(3).map(|s| s.to_string()),
        }
    } else if rest.len() > 1 && policy.accepts_branch(head) {
        // Optimistic: an unrecognized first segment with anything after it
        // is assumed to name a branch deployment; no existence check is
        // possible from a static 404 page. A lone unknown segment carries
        // too little evidence and falls back to the landing deployment.
        let target = DeploymentTarget::BranchDeployment {
            branch: head.to_string(),
        };
        match rest.get(1) {
            Some(&second) if registry.is_known_component(second) => RouteParse {
                target,
                component: Some(second.to_string()),
                user: rest.get(2).map(|s| s.to_string()),
                repo: rest.get(3).map(|s| s.to_string()),
                branch: rest.get(4).map(|s| s.to_string()),
            },
            // Not a DAK context; the remainder passes through unparsed.
            _ => RouteParse {
                target,
                component: None,
                user: None,
                repo: None,
                branch: None,
            },
        }
    } else {
        debug!(segment = head, "segment yields no deployment context");
        RouteParse::landing()
    };

    // A bare user without a repo is not a valid DAK context.
    if parse.user.is_some() != parse.repo.is_some() {
        parse.user = None;
        parse.repo = None;
        parse.branch = None;
    }

    parse
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use sgex_types::OptimisticPolicy;

    fn component() -> impl Strategy<Value = String> {
        proptest::sample::select(vec![
            "dashboard".to_string(),
            "dak-action".to_string(),
            "select".to_string(),
            "documentation".to_string(),
            "testing-viewer".to_string(),
        ])
    }

    proptest! {
        /// Property: for landing-page-style paths with a known component
        /// and a user/repo pair, the extracted context equals the
        /// corresponding path segments.
        #[test]
        fn prop_landing_style_segments_extracted(
            component in component(),
            user in "[a-zA-Z0-9_-]{1,15}",
            repo in "[a-zA-Z0-9_.-]{1,20}",
        ) {
            let registry = ComponentRegistry::fallback();
            let pathname = format!("/sgex/{}/{}/{}", component, user, repo);
            let parse = classify_path(&pathname, &registry, &OptimisticPolicy);
            prop_assert_eq!(parse.target, DeploymentTarget::Landing);
            prop_assert_eq!(parse.component, Some(component));
            prop_assert_eq!(parse.user, Some(user));
            prop_assert_eq!(parse.repo, Some(repo));
        }

        /// Property: classification never emits a half-populated
        /// user/repo pair, whatever the pathname.
        #[test]
        fn prop_pairing_invariant(pathname in "/[a-zA-Z0-9/._-]{0,60}") {
            let registry = ComponentRegistry::fallback();
            let parse = classify_path(&pathname, &registry, &OptimisticPolicy);
            prop_assert_eq!(parse.user.is_some(), parse.repo.is_some());
        }
    }
}
