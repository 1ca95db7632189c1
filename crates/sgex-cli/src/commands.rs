//! CLI command implementations.

use sgex_context::{RecordingHistory, RouterParams, RoutingContextService};
use sgex_registry::ComponentRegistry;
use sgex_resolver::{RedirectResolver, Resolution};
use sgex_session::{MemorySessionStore, RoutingMailbox};
use sgex_types::UrlParts;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

fn registry(routes: Option<&Path>) -> ComponentRegistry {
    match routes {
        Some(path) => ComponentRegistry::load_or_fallback(path),
        None => ComponentRegistry::fallback(),
    }
}

fn print_resolution(resolution: &Resolution) {
    match resolution {
        Resolution::Redirect { location, context } => {
            println!("redirect -> {location}");
            if let Some(component) = &context.component {
                println!("  component: {component}");
            }
            if let (Some(user), Some(repo)) = (&context.user, &context.repo) {
                println!("  repository: {user}/{repo}");
            }
            if let Some(branch) = &context.branch {
                println!("  branch: {branch}");
            }
            if let Some(deployment) = &context.deployment_branch {
                println!("  deployment: {deployment}");
            }
        }
        Resolution::LoopDetected {
            target,
            attempts,
            chain,
        } => {
            println!("too many redirects to {target} ({attempts} recent attempts)");
            println!("routing chain:");
            for line in chain {
                println!("  {line}");
            }
        }
    }
}

/// Resolve one URL the way the 404 handler would.
pub fn resolve(url: &str, routes: Option<&Path>, json: bool) -> Result<()> {
    tracing::info!(url = %url, "resolving");

    let store = Arc::new(MemorySessionStore::new());
    let mut resolver = RedirectResolver::new(registry(routes), RoutingMailbox::new(store));
    let resolution = resolver.resolve(&UrlParts::parse(url));

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print_resolution(&resolution);
    }
    Ok(())
}

/// Replay `count` resolutions of `url` against one shared session store,
/// demonstrating ledger pruning and the terminal diagnostic state.
pub fn simulate(url: &str, routes: Option<&Path>, count: usize) -> Result<()> {
    let store = Arc::new(MemorySessionStore::new());
    let parts = UrlParts::parse(url);

    for attempt in 1..=count {
        // Each hop is its own 404 page load sharing the tab's store.
        let mut resolver =
            RedirectResolver::new(registry(routes), RoutingMailbox::new(store.clone()));
        print!("attempt {attempt}: ");
        let resolution = resolver.resolve(&parts);
        print_resolution(&resolution);
        if matches!(resolution, Resolution::LoopDetected { .. }) {
            break;
        }
    }
    Ok(())
}

/// Resolve a URL, then restore context the way the SPA would after the
/// redirect navigation.
pub fn restore(url: &str, routes: Option<&Path>, json: bool) -> Result<()> {
    let store = Arc::new(MemorySessionStore::new());
    let mut resolver =
        RedirectResolver::new(registry(routes), RoutingMailbox::new(store.clone()));

    let landed = match resolver.resolve(&UrlParts::parse(url)) {
        Resolution::Redirect { location, .. } => {
            println!("redirect -> {location}");
            UrlParts::parse(&location)
        }
        terminal @ Resolution::LoopDetected { .. } => {
            print_resolution(&terminal);
            return Ok(());
        }
    };

    let history = Arc::new(RecordingHistory::new());
    let mut service = RoutingContextService::new(
        registry(routes),
        RoutingMailbox::new(store),
        history.clone(),
    );
    let page = service.initialize(&landed, &RouterParams::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("restored page context:");
        println!("  component: {}", page.component.as_deref().unwrap_or("-"));
        println!("  user:      {}", page.user.as_deref().unwrap_or("-"));
        println!("  repo:      {}", page.repo.as_deref().unwrap_or("-"));
        println!("  branch:    {}", page.branch.as_deref().unwrap_or("-"));
        println!("  search:    {}", page.search);
        println!("  hash:      {}", page.hash);
        if let Some(cleaned) = history.last() {
            println!("  cleaned url: {cleaned}");
        }
    }
    Ok(())
}

/// List the known DAK components.
pub fn components(routes: Option<&Path>) -> Result<()> {
    let registry = registry(routes);
    if registry.is_fallback() {
        println!("(using built-in fallback component set)");
    }
    for entry in registry.entries() {
        println!("{:<20} {}", entry.id, entry.module);
    }
    Ok(())
}
