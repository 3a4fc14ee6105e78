//! Fuzz target for processor declaration parsing and normalization.
//!
//! This fuzzer tests that:
//! 1. Any JSON document is accepted as a processor declaration without panicking
//! 2. Normalization never yields more processors than declared entries

#![no_main]

use libfuzzer_sys::fuzz_target;
use property_inspector::ProcessorSpec;
use property_inspector::processor::normalize;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let spec = ProcessorSpec::from_value(&value);
        let config = normalize(&spec);
        assert!(config.len() <= spec.len());
    }
});
