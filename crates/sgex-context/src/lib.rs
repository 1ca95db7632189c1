//! Routing context restoration inside the loaded SPA.
//!
//! Runs once per page load: reads the context the redirect resolver left
//! in the tab-session mailbox, reconciles it with what the SPA's own
//! router parsed from the current URL, restores the carried hash, and
//! strips the transient routing marker from the visible URL with a
//! non-navigating history replace.

mod history;
mod service;

pub use history::{HistoryApi, RecordingHistory};
pub use service::{PageContext, RouterParams, RoutingContextService};
