//! System information retrieval.
//!
//! A [`SysInfoProbe`] answers one [`SysInfoQuery`] at a time with a
//! categorized [`SysInfoResult`]. Probes only read the host; they never touch
//! the report context or any global state, so each kind can be queried
//! independently and a failure in one does not affect the others.

mod host;
pub mod parsers;

pub use host::HostProbe;

use er_common::{SysInfoQuery, SysInfoResult};
use thiserror::Error;

/// Errors from a single system-info query.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("uname failed: {0}")]
    Uname(#[source] std::io::Error),
    #[error("query '{0}' is not supported on this platform")]
    Unsupported(SysInfoQuery),
    #[error("probe panicked: {0}")]
    Panicked(String),
}

/// Retrieves categorized host facts.
pub trait SysInfoProbe: Send + Sync {
    /// Answer one query.
    fn retrieve(&self, query: SysInfoQuery) -> Result<SysInfoResult, ProbeError>;
}

impl<P: SysInfoProbe + ?Sized> SysInfoProbe for Box<P> {
    fn retrieve(&self, query: SysInfoQuery) -> Result<SysInfoResult, ProbeError> {
        (**self).retrieve(query)
    }
}
