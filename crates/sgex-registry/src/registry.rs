//! The DAK component registry.

use crate::Result;
use serde::{Deserialize, Serialize};
use sgex_types::RoutingConfig;
use std::path::Path;
use tracing::{info, warn};

/// Minimum component set the landing experience needs.
///
/// Used whenever the route configuration resource cannot be loaded;
/// resolution must keep recognizing these rather than fail closed.
pub const FALLBACK_COMPONENTS: &[(&str, &str)] = &[
    ("dashboard", "components/DAKDashboard"),
    ("dak-action", "components/DAKActionSelection"),
    ("select", "components/DAKSelection"),
    ("documentation", "components/Documentation"),
    ("testing-viewer", "components/TestingViewer"),
];

/// One routable DAK component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Identifier appearing as a URL path segment.
    pub id: String,
    /// Lazy-loadable module implementing the component.
    pub module: String,
}

/// Shape of the route configuration resource.
#[derive(Debug, Deserialize)]
struct RouteConfigFile {
    #[serde(default)]
    config: RoutingConfig,
    components: Vec<ComponentEntry>,
}

/// The set of valid DAK component identifiers, loaded once at bootstrap
/// and read-only thereafter.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    config: RoutingConfig,
    entries: Vec<ComponentEntry>,
    fallback: bool,
}

impl ComponentRegistry {
    /// Parses a route configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: RouteConfigFile = serde_json::from_str(raw)?;
        Ok(Self {
            config: file.config,
            entries: file.components,
            fallback: false,
        })
    }

    /// Loads the configuration resource at `path`, falling back to
    /// [`FALLBACK_COMPONENTS`] if it cannot be read or parsed.
    ///
    /// The fallback is logged once here, not silently swallowed.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::RegistryError::from)
            .and_then(|raw| Self::from_json(&raw));
        match loaded {
            Ok(registry) => {
                info!(
                    path = %path.display(),
                    components = registry.entries.len(),
                    "loaded route configuration"
                );
                registry
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "route configuration unavailable, using fallback component set"
                );
                Self::fallback()
            }
        }
    }

    /// Builds the hardcoded fallback registry.
    pub fn fallback() -> Self {
        Self {
            config: RoutingConfig::default(),
            entries: FALLBACK_COMPONENTS
                .iter()
                .map(|(id, module)| ComponentEntry {
                    id: (*id).to_string(),
                    module: (*module).to_string(),
                })
                .collect(),
            fallback: true,
        }
    }

    /// Returns true if `name` is a known DAK component identifier.
    pub fn is_known_component(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.id == name)
    }

    /// Returns the component entries in configuration order.
    pub fn entries(&self) -> &[ComponentEntry] {
        &self.entries
    }

    /// Returns the routing configuration bundled with the component list.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Returns true if this registry is the hardcoded fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "config": { "redirectCeiling": 7 },
        "components": [
            { "id": "dashboard", "module": "components/DAKDashboard" },
            { "id": "bpmn-editor", "module": "components/BpmnEditor" }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let registry = ComponentRegistry::from_json(SAMPLE).unwrap();
        assert!(registry.is_known_component("dashboard"));
        assert!(registry.is_known_component("bpmn-editor"));
        assert!(!registry.is_known_component("who"));
        assert!(!registry.is_fallback());
        assert_eq!(registry.entries().len(), 2);
    }

    #[test]
    fn test_config_defaults_when_omitted() {
        let registry =
            ComponentRegistry::from_json(r#"{"components": []}"#).unwrap();
        assert_eq!(registry.config().site_root, "sgex");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ComponentRegistry::from_json("{oops").is_err());
    }

    #[test]
    fn test_fallback_covers_minimum_set() {
        let registry = ComponentRegistry::fallback();
        assert!(registry.is_fallback());
        for (id, _) in FALLBACK_COMPONENTS {
            assert!(registry.is_known_component(id), "missing {}", id);
        }
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let registry = ComponentRegistry::load_or_fallback("/nonexistent/routes.json");
        assert!(registry.is_fallback());
        assert!(registry.is_known_component("dashboard"));
    }
}
