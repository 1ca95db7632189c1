//! Fuzz target for redirect-location construction.
//!
//! Tests that building a redirect location from arbitrary query and hash
//! state never panics and always preserves the hash verbatim.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sgex_resolver::build_redirect_location;

fuzz_target!(|input: (&str, &str, &str)| {
    let (pathname, search, hash) = input;
    let location =
        build_redirect_location("/sgex/", pathname, search, hash, "sgex_route");
    assert!(location.ends_with(hash));
    assert!(location.starts_with("/sgex/?"));
});
