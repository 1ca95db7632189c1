//! Fuzz target for URL decomposition.
//!
//! Tests that splitting arbitrary input into pathname/search/hash never
//! panics and that reassembly of a relative input is lossless.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sgex_types::UrlParts;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parts = UrlParts::parse(s);

        // Relative inputs that already start with '/' must round-trip.
        if s.starts_with('/') {
            assert_eq!(parts.to_relative(), s);
        }
    }

    // Lossy conversion exercises the same paths with replacement chars.
    let lossy = String::from_utf8_lossy(data);
    let _ = UrlParts::parse(&lossy);
});
