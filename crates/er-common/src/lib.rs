//! Fault report common types and errors.
//!
//! This crate provides the data shared across the report pipeline:
//! - The caller-owned report context and its runtime facts
//! - System-info query kinds and categorized results
//! - Report identity
//! - The unified error taxonomy

pub mod context;
pub mod error;
pub mod id;
pub mod sysinfo;

pub use context::{BinaryIdentity, ExceptionInfo, HeldError, ReportContext, RuntimeFacts};
pub use error::{Error, ErrorCategory, Result};
pub use id::ReportId;
pub use sysinfo::{SysInfoFact, SysInfoQuery, SysInfoResult};
