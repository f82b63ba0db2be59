//! JSON report renderer for transports that upload structured reports.

use crate::config::ReportConfig;
use crate::document::ReportDocument;
use crate::error::Result;
use crate::formatter::ReportFormatter;

use er_common::{ReportContext, SysInfoResult};
use tracing::debug;

/// Renders the report document as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonReportFormatter {
    config: ReportConfig,
    pretty: bool,
}

impl JsonReportFormatter {
    /// Create a JSON formatter with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    /// Emit indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, context: &ReportContext, sys_info: &[SysInfoResult]) -> Result<String> {
        self.config.validate()?;
        let doc = ReportDocument::build(&self.config, context, sys_info);
        debug!(title = %doc.title(), pretty = self.pretty, "Rendering JSON report");
        let json = if self.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }
}
