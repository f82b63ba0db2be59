//! Fuzz target for /proc/meminfo parsing.

#![no_main]

use er_core::sysinfo::parsers::{format_kb, parse_meminfo_content};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let info = parse_meminfo_content(s);
        if let Some(total) = info.total_kb {
            let _ = format_kb(total);
        }
    }
});
