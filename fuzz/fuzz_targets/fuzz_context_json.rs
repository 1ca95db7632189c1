//! Fuzz target for persisted-context decoding.
//!
//! The mailbox decodes session-storage payloads it does not control;
//! decoding must reject garbage without panicking, and valid contexts
//! must re-encode losslessly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sgex_types::NavigationalContext;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(context) = serde_json::from_str::<NavigationalContext>(s) {
        let encoded = serde_json::to_string(&context).expect("re-encode");
        let decoded: NavigationalContext =
            serde_json::from_str(&encoded).expect("decode re-encoded");
        assert_eq!(decoded, context);
    }
});
