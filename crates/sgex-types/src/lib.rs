//! Common types used throughout the SGeX routing subsystem.
//!
//! This crate provides the shared data model for deployment-redirect
//! resolution: the navigational context extracted from an incoming URL,
//! the deployment target classification, routing-log records, and the
//! subsystem configuration.

mod config;
mod context;
mod deployment;
mod log;
mod url_parts;

pub use config::RoutingConfig;
pub use context::NavigationalContext;
pub use deployment::{DeploymentPolicy, DeploymentTarget, OptimisticPolicy};
pub use log::{RoutingEvent, RoutingLogEntry};
pub use url_parts::UrlParts;

/// Returns the current wall-clock time in unix milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
