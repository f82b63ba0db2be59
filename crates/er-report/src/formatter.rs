//! Rendering strategy contract.

use crate::error::Result;
use er_common::{ReportContext, SysInfoResult};

/// Converts an enriched context and its system-info results into the final
/// report artifact.
///
/// Implementations must not mutate anything; the generator may call
/// `format` several times for one context.
pub trait ReportFormatter: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Render the report.
    fn format(&self, context: &ReportContext, sys_info: &[SysInfoResult]) -> Result<String>;
}

impl<F: ReportFormatter + ?Sized> ReportFormatter for Box<F> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn format(&self, context: &ReportContext, sys_info: &[SysInfoResult]) -> Result<String> {
        (**self).format(context, sys_info)
    }
}
