//! Fuzz target for /proc/uptime parsing.
//!
//! Parsed values must be finite and non-negative so formatting never
//! sees NaN or a negative duration.

#![no_main]

use er_core::sysinfo::parsers::{format_uptime, parse_uptime_content};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(secs) = parse_uptime_content(s) {
            assert!(secs.is_finite() && secs >= 0.0);
            let _ = format_uptime(secs);
        }
    }
});
