//! Probe backed by the live host.

use super::parsers::{
    format_kb, format_uptime, parse_cpu_model_content, parse_meminfo_content,
    parse_os_release_content, parse_uptime_content,
};
use super::{ProbeError, SysInfoProbe};

use er_common::{SysInfoQuery, SysInfoResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads operating system and machine facts from the running host.
///
/// File-backed facts (`/proc`, `/etc/os-release`) are optional: a missing
/// file drops that fact only. Kernel identity comes from `uname(2)` and is
/// required on unix.
#[derive(Debug, Clone)]
pub struct HostProbe {
    proc_root: PathBuf,
    etc_root: PathBuf,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe {
    /// Probe the real `/proc` and `/etc`.
    pub fn new() -> Self {
        Self::with_roots("/proc", "/etc")
    }

    /// Probe alternate roots, e.g. a captured host snapshot.
    pub fn with_roots(proc_root: impl Into<PathBuf>, etc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            etc_root: etc_root.into(),
        }
    }

    fn operating_system(&self) -> Result<SysInfoResult, ProbeError> {
        debug!("probing operating system");
        let uname = uname(SysInfoQuery::OperatingSystem)?;
        let os_release = read_optional(&self.etc_root.join("os-release"))
            .map(|content| parse_os_release_content(&content))
            .unwrap_or_default();

        let name = os_release
            .get("PRETTY_NAME")
            .or_else(|| os_release.get("NAME"))
            .cloned()
            .unwrap_or_else(|| uname.sysname.clone());

        let uptime = read_optional(&self.proc_root.join("uptime"))
            .and_then(|content| parse_uptime_content(&content))
            .map(format_uptime);

        Ok(SysInfoResult::new(SysInfoQuery::OperatingSystem)
            .with_fact("Name", name)
            .with_optional_fact("Version", os_release.get("VERSION_ID").cloned())
            .with_fact("Family", std::env::consts::FAMILY)
            .with_fact("Kernel", format!("{} {}", uname.sysname, uname.release))
            .with_fact("Kernel Version", uname.version)
            .with_fact("Architecture", std::env::consts::ARCH)
            .with_optional_fact("Uptime", uptime))
    }

    fn machine(&self) -> Result<SysInfoResult, ProbeError> {
        debug!("probing machine");
        let uname = uname(SysInfoQuery::Machine)?;
        let processor = read_optional(&self.proc_root.join("cpuinfo"))
            .and_then(|content| parse_cpu_model_content(&content));
        let logical = std::thread::available_parallelism()
            .ok()
            .map(|n| n.get().to_string());
        let mem = read_optional(&self.proc_root.join("meminfo"))
            .map(|content| parse_meminfo_content(&content))
            .unwrap_or_default();

        Ok(SysInfoResult::new(SysInfoQuery::Machine)
            .with_fact("Host Name", uname.nodename)
            .with_fact("Hardware", uname.machine)
            .with_optional_fact("Processor", processor)
            .with_optional_fact("Logical Processors", logical)
            .with_optional_fact("Total Memory", mem.total_kb.map(format_kb))
            .with_optional_fact("Available Memory", mem.available_kb.map(format_kb)))
    }
}

impl SysInfoProbe for HostProbe {
    fn retrieve(&self, query: SysInfoQuery) -> Result<SysInfoResult, ProbeError> {
        match query {
            SysInfoQuery::OperatingSystem => self.operating_system(),
            SysInfoQuery::Machine => self.machine(),
            other => Err(ProbeError::Unsupported(other)),
        }
    }
}

/// Read a host file, treating absence or unreadability as "fact unknown".
fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            trace!(path = %path.display(), error = %err, "host file unavailable");
            None
        }
    }
}

/// Kernel identity from uname(2).
#[derive(Debug, Clone)]
struct Uname {
    sysname: String,
    nodename: String,
    release: String,
    version: String,
    machine: String,
}

#[cfg(unix)]
fn uname(_query: SysInfoQuery) -> Result<Uname, ProbeError> {
    use std::ffi::CStr;

    let mut buf = std::mem::MaybeUninit::<libc::utsname>::uninit();
    let result = unsafe { libc::uname(buf.as_mut_ptr()) };
    if result != 0 {
        return Err(ProbeError::Uname(std::io::Error::last_os_error()));
    }
    let buf = unsafe { buf.assume_init() };
    let field = |raw: &[libc::c_char]| unsafe {
        CStr::from_ptr(raw.as_ptr()).to_string_lossy().into_owned()
    };
    Ok(Uname {
        sysname: field(&buf.sysname),
        nodename: field(&buf.nodename),
        release: field(&buf.release),
        version: field(&buf.version),
        machine: field(&buf.machine),
    })
}

#[cfg(not(unix))]
fn uname(query: SysInfoQuery) -> Result<Uname, ProbeError> {
    Err(ProbeError::Unsupported(query))
}
