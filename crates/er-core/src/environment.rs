//! Runtime environment facts stamped onto a report context.
//!
//! Reading the current user, host name and locale are global-state reads.
//! They go through [`EnvironmentFacts`] so the generator can be driven by
//! [`SystemEnvironment`] in production and [`FixedEnvironment`] in tests.

use chrono::{DateTime, Utc};
use er_common::{BinaryIdentity, RuntimeFacts};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Declared product identity of the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub name: String,
    pub version: String,
}

impl AppIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Build an [`AppIdentity`] from the calling crate's package metadata.
#[macro_export]
macro_rules! app_identity {
    () => {
        $crate::AppIdentity::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
}

/// Source of the runtime facts stamped at generator construction.
pub trait EnvironmentFacts: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
    /// OS account running the process.
    fn user_name(&self) -> String;
    /// Host name.
    fn machine_name(&self) -> String;
    /// Product identity of the application.
    fn app_identity(&self) -> AppIdentity;
    /// Culture/region display name.
    fn region(&self) -> String;
    /// Identity of the entry executable.
    fn entry_binary(&self) -> Option<BinaryIdentity>;

    /// Read every fact once, in one synchronous pass.
    fn capture(&self) -> RuntimeFacts {
        let app = self.app_identity();
        let facts = RuntimeFacts {
            exception_date: self.now(),
            user_name: self.user_name(),
            machine_name: self.machine_name(),
            app_name: app.name,
            app_version: app.version,
            region: self.region(),
            app_binary: self.entry_binary(),
        };
        debug!(
            user = %facts.user_name,
            machine = %facts.machine_name,
            app = %facts.app_name,
            version = %facts.app_version,
            region = %facts.region,
            "captured runtime facts"
        );
        facts
    }
}

const UNKNOWN: &str = "unknown";
const INVARIANT: &str = "Invariant";

/// Facts read from the live process and host.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    app: AppIdentity,
}

impl SystemEnvironment {
    pub fn new(app: AppIdentity) -> Self {
        Self { app }
    }
}

impl EnvironmentFacts for SystemEnvironment {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn user_name(&self) -> String {
        current_user_name()
            .or_else(|| env_first(&["USER", "USERNAME", "LOGNAME"]))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn machine_name(&self) -> String {
        current_host_name()
            .or_else(|| env_first(&["HOSTNAME", "COMPUTERNAME"]))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn app_identity(&self) -> AppIdentity {
        self.app.clone()
    }

    fn region(&self) -> String {
        // POSIX precedence: the first set variable is the active locale, even `C`.
        let active = env_first(&["LC_ALL", "LC_MESSAGES", "LANG"]);
        region_for_active_locale(active.as_deref())
    }

    fn entry_binary(&self) -> Option<BinaryIdentity> {
        let path = std::env::current_exe().ok()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let metadata = std::fs::metadata(&path).ok();
        Some(BinaryIdentity {
            name,
            path: path.display().to_string(),
            size_bytes: metadata.as_ref().map(|m| m.len()),
            modified: metadata
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from),
        })
    }
}

/// Deterministic facts for tests and reproducible renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEnvironment {
    pub now: DateTime<Utc>,
    pub user_name: String,
    pub machine_name: String,
    pub app: AppIdentity,
    pub region: String,
    pub entry_binary: Option<BinaryIdentity>,
}

impl Default for FixedEnvironment {
    fn default() -> Self {
        Self {
            now: DateTime::<Utc>::UNIX_EPOCH,
            user_name: "test-user".to_string(),
            machine_name: "test-host".to_string(),
            app: AppIdentity::new("test-app", "0.0.0"),
            region: "en-US".to_string(),
            entry_binary: None,
        }
    }
}

impl FixedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_user_name(mut self, user: impl Into<String>) -> Self {
        self.user_name = user.into();
        self
    }

    pub fn with_machine_name(mut self, machine: impl Into<String>) -> Self {
        self.machine_name = machine.into();
        self
    }

    pub fn with_app(mut self, app: AppIdentity) -> Self {
        self.app = app;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_entry_binary(mut self, binary: BinaryIdentity) -> Self {
        self.entry_binary = Some(binary);
        self
    }
}

impl EnvironmentFacts for FixedEnvironment {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn user_name(&self) -> String {
        self.user_name.clone()
    }

    fn machine_name(&self) -> String {
        self.machine_name.clone()
    }

    fn app_identity(&self) -> AppIdentity {
        self.app.clone()
    }

    fn region(&self) -> String {
        self.region.clone()
    }

    fn entry_binary(&self) -> Option<BinaryIdentity> {
        self.entry_binary.clone()
    }
}

/// Turn a POSIX locale (`en_US.UTF-8@euro`) into a region label (`en-US`).
///
/// `C` and `POSIX` carry no region and yield `None`.
pub fn region_from_locale(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    if base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Region label for the active locale; `C`, `POSIX` and no locale at all
/// are `Invariant`.
pub fn region_for_active_locale(locale: Option<&str>) -> String {
    locale
        .and_then(region_from_locale)
        .unwrap_or_else(|| INVARIANT.to_string())
}

fn env_first(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(unix)]
fn current_user_name() -> Option<String> {
    use std::ffi::CStr;

    // SAFETY: getpwuid returns a pointer into static storage or null.
    unsafe {
        let pwd = libc::getpwuid(libc::geteuid());
        if pwd.is_null() {
            return None;
        }
        CStr::from_ptr((*pwd).pw_name).to_str().ok().map(str::to_string)
    }
}

#[cfg(not(unix))]
fn current_user_name() -> Option<String> {
    None
}

#[cfg(unix)]
fn current_host_name() -> Option<String> {
    let mut buf = [0u8; 256];
    let result = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if result != 0 {
        return None;
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..len]).into_owned();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn current_host_name() -> Option<String> {
    None
}
