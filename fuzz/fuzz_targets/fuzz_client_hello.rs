//! Fuzz target for the strict hello decoders and the fingerprints built on them
//!
//! Run with: cargo +nightly fuzz run fuzz_client_hello

#![no_main]

use hello_inspector::services::ja4::{ja4, ja4s};
use hello_inspector::services::tls_parser::{decode_client_hello, decode_server_hello};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = decode_client_hello(data) {
        // a decoded hello spans the whole buffer
        assert_eq!(record.length.value as usize + 5, data.len());
        let fp = ja4(&record);
        assert_eq!(fp.ja4.len(), 36);
    }
    if let Ok(record) = decode_server_hello(data) {
        let _ = ja4s(&record);
    }
});
