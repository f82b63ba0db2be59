//! Fault report generation.
//!
//! A [`ReportGenerator`] takes a caller's [`ReportContext`], stamps it with
//! runtime facts (time, user, host, application identity, region, entry
//! binary), fetches operating system and machine info once, and renders the
//! report through a pluggable [`ReportFormatter`].
//!
//! # Example
//!
//! ```no_run
//! use er_core::{app_identity, ReportContext, ReportGenerator};
//!
//! fn report(err: std::io::Error) -> er_core::Result<String> {
//!     let mut ctx = ReportContext::from_error(err)
//!         .with_title("Save failed")
//!         .with_main_message("The document could not be written.");
//!     let generator = ReportGenerator::builder(app_identity!()).build(&mut ctx)?;
//!     generator.create_report()
//! }
//! ```
//!
//! # Modules
//!
//! - [`environment`]: runtime facts providers
//! - [`sysinfo`]: host probes and `/proc` parsers
//! - [`generator`]: the orchestrator
//! - [`hook`]: panic hook integration
//! - [`logging`]: tracing subscriber setup

pub mod environment;
pub mod generator;
pub mod hook;
pub mod logging;
pub mod sysinfo;

#[cfg(test)]
mod test_utils;

pub use environment::{AppIdentity, EnvironmentFacts, FixedEnvironment, SystemEnvironment};
pub use generator::{ReportGenerator, ReportGeneratorBuilder};
pub use hook::{install_panic_hook, PanicHookOptions};
pub use sysinfo::{HostProbe, ProbeError, SysInfoProbe};

pub use er_common::{
    BinaryIdentity, Error, ExceptionInfo, ReportContext, ReportId, Result, RuntimeFacts,
    SysInfoFact, SysInfoQuery, SysInfoResult,
};
pub use er_report::{
    JsonReportFormatter, ReportConfig, ReportFormatter, ReportSections, TextReportFormatter,
};
