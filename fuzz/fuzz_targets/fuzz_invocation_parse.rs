#![no_main]

use libfuzzer_sys::fuzz_target;

use cbc_contract::{Arg, Invocation};

// Argument and invocation decoding must never panic on untrusted input.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(arg) = text.parse::<Arg>() {
            // Display output parses back to the same argument.
            assert_eq!(arg.to_string().parse::<Arg>().ok(), Some(arg));
        }
    }

    if let Ok(invocation) = serde_json::from_slice::<Invocation>(data) {
        let _ = invocation.canonical_bytes();
    }
});
