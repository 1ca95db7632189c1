//! Fuzz target for path classification.
//!
//! Tests that classification of arbitrary pathnames never panics and
//! never emits a half-populated user/repo pair.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sgex_registry::ComponentRegistry;
use sgex_resolver::classify_path;
use sgex_types::OptimisticPolicy;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let registry = ComponentRegistry::fallback();
        let parse = classify_path(s, &registry, &OptimisticPolicy);

        assert_eq!(parse.user.is_some(), parse.repo.is_some());
        if let Some(component) = &parse.component {
            assert!(registry.is_known_component(component));
        }
    }
});
