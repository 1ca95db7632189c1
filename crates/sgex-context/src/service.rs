//! The routing context service.

use crate::HistoryApi;
use serde::Serialize;
use sgex_registry::{try_restore_context, ComponentRegistry};
use sgex_session::{RoutingLog, RoutingMailbox, CONTEXT_KEY};
use sgex_types::UrlParts;
use std::sync::Arc;
use tracing::{debug, error};
use url::form_urlencoded;

/// Path parameters the SPA's own router extracted from the current URL.
///
/// Populated on normal in-app navigations that never went through the
/// redirect resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterParams {
    /// DAK component from the route table.
    pub component: Option<String>,
    /// GitHub organization or user path param.
    pub user: Option<String>,
    /// GitHub repository path param.
    pub repo: Option<String>,
    /// Content branch path param.
    pub branch: Option<String>,
}

impl RouterParams {
    fn is_empty(&self) -> bool {
        self.component.is_none()
            && self.user.is_none()
            && self.repo.is_none()
            && self.branch.is_none()
    }
}

/// The navigational context handed to page components.
///
/// This is the only contract the rest of the application needs from the
/// routing subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Current DAK component, if any.
    pub component: Option<String>,
    /// GitHub organization or user, if any.
    pub user: Option<String>,
    /// GitHub repository, if any.
    pub repo: Option<String>,
    /// Content branch, if any.
    pub branch: Option<String>,
    /// Query string for the page, marker already stripped.
    pub search: String,
    /// Fragment for the page.
    pub hash: String,
}

struct Initialized {
    context: PageContext,
    final_url: String,
}

/// Reconciles resolver-persisted context with the SPA's router state.
///
/// `initialize` is idempotent within one page load: the second call
/// returns the same context and final URL as the first and performs no
/// further history replacement.
pub struct RoutingContextService {
    registry: ComponentRegistry,
    mailbox: RoutingMailbox,
    history: Arc<dyn HistoryApi>,
    log: RoutingLog,
    initialized: Option<Initialized>,
}

impl RoutingContextService {
    /// Creates the service for one page load.
    pub fn new(
        registry: ComponentRegistry,
        mailbox: RoutingMailbox,
        history: Arc<dyn HistoryApi>,
    ) -> Self {
        let log = RoutingLog::new(mailbox.clone(), registry.config().max_log_entries);
        Self {
            registry,
            mailbox,
            history,
            log,
            initialized: None,
        }
    }

    /// Restores context for the current page and cleans the visible URL.
    ///
    /// Resolution order: the router's own path parameters win, then the
    /// persisted context, then nothing (the page is context-free). The
    /// routing marker is stripped from the query and a hash carried
    /// across the redirect is re-applied when the router did not already
    /// bring one forward.
    pub fn initialize(&mut self, current: &UrlParts, router: &RouterParams) -> PageContext {
        if let Some(initialized) = &self.initialized {
            return initialized.context.clone();
        }

        let restored = try_restore_context(&self.mailbox, self.registry.config());
        // Consumed: one bounded read per page load, then the mailbox slot
        // is freed rather than left to expire.
        if restored.is_some() {
            match self.mailbox.clear_context() {
                Ok(()) => self.log.storage_update(CONTEXT_KEY),
                Err(e) => {
                    error!(error = %e, "context clear failed");
                    self.log.error(format!("context clear failed: {}", e));
                }
            }
        }

        let search = strip_marker(&current.search, &self.registry.config().marker_param);
        let hash = if current.hash.is_empty() {
            restored
                .as_ref()
                .map(|c| c.hash.clone())
                .unwrap_or_default()
        } else {
            current.hash.clone()
        };

        let final_url = UrlParts::new(current.pathname.clone(), search.clone(), hash.clone());
        if final_url != *current {
            debug!(from = %current, to = %final_url, "cleaning visible url");
            self.history.replace_url(&final_url.to_relative());
        }

        let context = if !router.is_empty() {
            debug!("using router path parameters for page context");
            self.log.context_resolution("router-params");
            let mut params = router.clone();
            if params.user.is_some() != params.repo.is_some() {
                params.user = None;
                params.repo = None;
                params.branch = None;
            }
            PageContext {
                component: params.component,
                user: params.user,
                repo: params.repo,
                branch: params.branch,
                search: search.clone(),
                hash: hash.clone(),
            }
        } else if let Some(restored) = restored {
            debug!(original_url = %restored.original_url, "using persisted context for page");
            self.log.context_resolution("persisted-context");
            PageContext {
                component: restored.component,
                user: restored.user,
                repo: restored.repo,
                branch: restored.branch,
                search: search.clone(),
                hash: hash.clone(),
            }
        } else {
            debug!("no context available, page is context-free");
            self.log.context_resolution("none");
            PageContext {
                search: search.clone(),
                hash: hash.clone(),
                ..Default::default()
            }
        };

        if let Some(component) = &context.component {
            self.log.component_load(component);
        }

        self.initialized = Some(Initialized {
            context: context.clone(),
            final_url: final_url.to_relative(),
        });
        context
    }

    /// Builds a context purely from the router's path parameters.
    ///
    /// This is the path taken for a normal in-app navigation that never
    /// went through the redirect resolver; the context mailbox slot is
    /// neither read nor consumed, only the decision is logged.
    pub fn fallback_context(&mut self, current: &UrlParts, router: &RouterParams) -> PageContext {
        self.log.context_resolution("router-params");
        let mut params = router.clone();
        if params.user.is_some() != params.repo.is_some() {
            params.user = None;
            params.repo = None;
            params.branch = None;
        }
        PageContext {
            component: params.component,
            user: params.user,
            repo: params.repo,
            branch: params.branch,
            search: strip_marker(&current.search, &self.registry.config().marker_param),
            hash: current.hash.clone(),
        }
    }

    /// Returns the cleaned URL decided by `initialize`, if it ran.
    pub fn final_url(&self) -> Option<&str> {
        self.initialized.as_ref().map(|i| i.final_url.as_str())
    }

    /// Returns the routing log for this page load.
    pub fn log(&self) -> &RoutingLog {
        &self.log
    }
}

/// Removes the routing marker parameter from a raw query string.
///
/// All other parameters keep their relative order; a query left with no
/// parameters becomes the empty string.
fn strip_marker(search: &str, marker_param: &str) -> String {
    if search.is_empty() {
        return String::new();
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in form_urlencoded::parse(search.trim_start_matches('?').as_bytes()) {
        if key != marker_param {
            serializer.append_pair(&key, &value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
