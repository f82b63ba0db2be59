//! Renderers for fault reports.
//!
//! A renderer receives an enriched [`er_common::ReportContext`] and the
//! ordered system-info results and produces the final artifact.
//!
//! # Renderers
//!
//! - [`TextReportFormatter`]: sectioned plain text for dialogs and email bodies
//! - [`JsonReportFormatter`]: structured JSON for upload transports
//!
//! # Sections
//!
//! - General: application, version, region, machine, user, date, messages
//! - Exceptions: one numbered section per exception with cause chain and backtrace
//! - Binary: entry executable identity
//! - System: operating system and machine facts
//!
//! # Example
//!
//! ```
//! use er_common::{ReportContext, SysInfoQuery, SysInfoResult};
//! use er_report::{ReportFormatter, TextReportFormatter};
//!
//! let ctx = ReportContext::new().with_title("Null reference");
//! let results = vec![SysInfoResult::new(SysInfoQuery::OperatingSystem).with_fact("Name", "TestOS")];
//! let text = TextReportFormatter::default().format(&ctx, &results).unwrap();
//! assert!(text.contains("TestOS"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod formatter;
pub mod json;
pub mod sections;
pub mod text;

pub use config::{ReportConfig, ReportSections};
pub use document::ReportDocument;
pub use error::{ReportError, Result};
pub use formatter::ReportFormatter;
pub use json::JsonReportFormatter;
pub use text::TextReportFormatter;
