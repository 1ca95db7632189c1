//! Deployment-redirect resolution for the SGeX Workbench.
//!
//! GitHub Pages serves static files only, so any deep link into the SPA
//! hits the 404 handler. This crate is that handler's logic: it
//! classifies the requested path, extracts the navigational context,
//! persists it to the tab-session mailbox, enforces the redirect-loop
//! ceiling, and produces the redirect location with all query and hash
//! state preserved.

mod classify;
mod redirect;
mod resolver;

pub use classify::{classify_path, RouteParse};
pub use redirect::build_redirect_location;
pub use resolver::{RedirectResolver, Resolution};
