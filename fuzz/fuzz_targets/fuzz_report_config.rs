//! Fuzz target for report configuration parsing.

#![no_main]

use er_report::ReportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing may fail; validation must not panic on whatever parses.
    if let Ok(config) = serde_json::from_slice::<ReportConfig>(data) {
        let _ = config.validate();
    }
});
