//! Fuzz target for /etc/os-release parsing.

#![no_main]

use er_core::sysinfo::parsers::parse_os_release_content;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_os_release_content(s);
    }
});
