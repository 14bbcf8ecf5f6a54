//! Fuzz target for the fail-soft record stream decoder
//!
//! Any byte sequence must decode without panicking and serialize cleanly.
//!
//! Run with: cargo +nightly fuzz run fuzz_record_stream

#![no_main]

use hello_inspector::services::record_stream::parse_records;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let records = parse_records(data);
    assert!(records.len() <= data.len() / 5);
    let _ = serde_json::to_string(&records);
});
