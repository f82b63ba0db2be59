//! Structured report document shared by all renderers.

use crate::config::ReportConfig;
use crate::sections::*;

use er_common::{ReportContext, SysInfoResult};
use serde::{Deserialize, Serialize};

/// Complete report data, with hidden sections left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version from the configuration.
    pub schema_version: String,
    /// Generator version.
    pub generator_version: String,
    /// Report-wide heading from the configuration, shown above all sections.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub heading: Option<String>,
    /// General section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSection>,
    /// Exceptions section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<ExceptionsSection>,
    /// Entry binary section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinarySection>,
    /// System info section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_info: Option<SystemInfoSection>,
}

impl ReportDocument {
    /// Assemble the document from an enriched context and probe results.
    pub fn build(config: &ReportConfig, context: &ReportContext, sys_info: &[SysInfoResult]) -> Self {
        let sections = &config.sections;
        Self {
            schema_version: config.schema_version.clone(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            heading: config.title.clone(),
            general: sections
                .general
                .then(|| GeneralSection::from_context(context)),
            exceptions: (sections.exceptions && !context.exceptions().is_empty()).then(|| {
                ExceptionsSection::from_exceptions(context.exceptions(), config.max_backtrace_lines)
            }),
            binary: if sections.binary {
                context
                    .runtime()
                    .and_then(|r| r.app_binary.as_ref())
                    .map(BinarySection::from)
            } else {
                None
            },
            system_info: sections
                .system_info
                .then(|| SystemInfoSection::new(sys_info)),
        }
    }

    /// Get the report title: the configured heading, else the fault title.
    pub fn title(&self) -> String {
        self.heading
            .clone()
            .or_else(|| self.general.as_ref().map(|g| g.title.clone()))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Fault Report".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportSections;
    use er_common::{ExceptionInfo, SysInfoQuery};

    #[test]
    fn test_hidden_sections_are_omitted() {
        let mut ctx = ReportContext::new().with_title("t");
        ctx.add_exception(ExceptionInfo::new("boom"));
        let config = ReportConfig::new().with_sections(ReportSections {
            general: true,
            exceptions: false,
            binary: true,
            system_info: false,
        });
        let doc = ReportDocument::build(
            &config,
            &ctx,
            &[SysInfoResult::new(SysInfoQuery::Machine)],
        );
        assert!(doc.general.is_some());
        assert!(doc.exceptions.is_none());
        assert!(doc.system_info.is_none());
        // Context never stamped: no binary identity to show.
        assert!(doc.binary.is_none());
    }

    #[test]
    fn test_title_fallback() {
        let ctx = ReportContext::new();
        let doc = ReportDocument::build(&ReportConfig::default(), &ctx, &[]);
        assert_eq!(doc.title(), "Fault Report");

        let doc = ReportDocument::build(&ReportConfig::new().with_title("Custom"), &ctx, &[]);
        assert_eq!(doc.title(), "Custom");
    }

    #[test]
    fn test_heading_keeps_fault_title() {
        let ctx = ReportContext::new().with_title("Null reference");
        let doc = ReportDocument::build(&ReportConfig::new().with_title("Crash Report"), &ctx, &[]);
        assert_eq!(doc.heading.as_deref(), Some("Crash Report"));
        assert_eq!(doc.general.unwrap().title, "Null reference");
    }
}
