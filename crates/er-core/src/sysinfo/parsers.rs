//! Parsers for host description files.
//!
//! # Files Parsed
//! - `/proc/meminfo` - Total and available memory
//! - `/proc/cpuinfo` - Processor model
//! - `/proc/uptime` - Seconds since boot
//! - `/etc/os-release` - Distribution name and version

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Memory totals from /proc/meminfo, in kB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemInfo {
    pub total_kb: Option<u64>,
    pub available_kb: Option<u64>,
}

/// Parse meminfo content.
pub fn parse_meminfo_content(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(Ok(value)) = rest.split_whitespace().next().map(str::parse::<u64>) else {
            continue;
        };
        match key.trim() {
            "MemTotal" => info.total_kb = Some(value),
            "MemAvailable" => info.available_kb = Some(value),
            _ => {}
        }
    }

    info
}

/// Parse the processor model from cpuinfo content.
///
/// x86 kernels report `model name`; many ARM kernels only report
/// `Hardware` or `Processor`.
pub fn parse_cpu_model_content(content: &str) -> Option<String> {
    let mut fallback = None;

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "model name" => return Some(value.to_string()),
            "Hardware" | "Processor" | "cpu model" if fallback.is_none() => {
                fallback = Some(value.to_string());
            }
            _ => {}
        }
    }

    fallback
}

/// Parse uptime content: "<uptime_secs> <idle_secs>".
pub fn parse_uptime_content(content: &str) -> Option<f64> {
    let secs: f64 = content.split_whitespace().next()?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

/// Parse os-release content into key/value pairs with quotes removed.
pub fn parse_os_release_content(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key.trim().to_string(), unquoted.to_string())
        })
        .collect()
}

/// Format a kB count for humans.
pub fn format_kb(kb: u64) -> String {
    let bytes = kb.saturating_mul(1024);
    if bytes >= 1_073_741_824 {
        format!("{:.1} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.0} MB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{} KB", kb)
    }
}

/// Format an uptime in seconds as `Nd Nh Nm`.
pub fn format_uptime(secs: f64) -> String {
    let total_minutes = (secs / 60.0) as u64;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meminfo() {
        let content = "MemTotal:       16318480 kB\nMemFree:         1234567 kB\nMemAvailable:    8000000 kB\n";
        let info = parse_meminfo_content(content);
        assert_eq!(info.total_kb, Some(16318480));
        assert_eq!(info.available_kb, Some(8000000));
    }

    #[test]
    fn test_parse_meminfo_garbage() {
        let info = parse_meminfo_content("MemTotal: lots\nnonsense\n:::\n");
        assert_eq!(info, MemInfo::default());
    }

    #[test]
    fn test_parse_cpu_model_x86() {
        let content = "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz\n";
        assert_eq!(
            parse_cpu_model_content(content).as_deref(),
            Some("Intel(R) Core(TM) i7-8650U CPU @ 1.90GHz")
        );
    }

    #[test]
    fn test_parse_cpu_model_arm_fallback() {
        let content = "Processor\t: AArch64 Processor rev 4 (aarch64)\nHardware\t: Qualcomm\n";
        assert_eq!(
            parse_cpu_model_content(content).as_deref(),
            Some("AArch64 Processor rev 4 (aarch64)")
        );
        assert_eq!(parse_cpu_model_content("flags\t: fpu vme\n"), None);
    }

    #[test]
    fn test_parse_uptime() {
        assert_eq!(parse_uptime_content("350735.47 234388.90\n"), Some(350735.47));
        assert_eq!(parse_uptime_content(""), None);
        assert_eq!(parse_uptime_content("-5 0"), None);
        assert_eq!(parse_uptime_content("NaN 0"), None);
    }

    #[test]
    fn test_parse_os_release() {
        let content = "# comment\nNAME=\"Ubuntu\"\nVERSION_ID='22.04'\nPRETTY_NAME=\"Ubuntu 22.04.3 LTS\"\nID=ubuntu\n\n";
        let map = parse_os_release_content(content);
        assert_eq!(map.get("NAME").map(String::as_str), Some("Ubuntu"));
        assert_eq!(map.get("VERSION_ID").map(String::as_str), Some("22.04"));
        assert_eq!(
            map.get("PRETTY_NAME").map(String::as_str),
            Some("Ubuntu 22.04.3 LTS")
        );
        assert_eq!(map.get("ID").map(String::as_str), Some("ubuntu"));
        assert!(!map.contains_key("# comment"));
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(16318480), "15.6 GB");
        assert_eq!(format_kb(512_000), "500 MB");
        assert_eq!(format_kb(512), "512 KB");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(59.0), "0m");
        assert_eq!(format_uptime(3_720.0), "1h 2m");
        assert_eq!(format_uptime(350735.47), "4d 1h 25m");
    }
}
