//! Fuzz target for /proc/cpuinfo parsing.

#![no_main]

use er_core::sysinfo::parsers::parse_cpu_model_content;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_cpu_model_content(s);
    }
});
