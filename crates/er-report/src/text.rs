//! Plain-text report renderer.

use crate::config::ReportConfig;
use crate::document::ReportDocument;
use crate::error::{ReportError, Result};
use crate::formatter::ReportFormatter;
use crate::sections::*;

use er_common::{ReportContext, SysInfoResult};
use std::fmt::Write;
use tracing::debug;

/// Renders reports as sectioned plain text suitable for a dialog text box or
/// an email body.
#[derive(Debug, Clone, Default)]
pub struct TextReportFormatter {
    config: ReportConfig,
}

impl TextReportFormatter {
    /// Create a text formatter with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render an already assembled document.
    pub fn render(&self, doc: &ReportDocument) -> Result<String> {
        self.config.validate()?;
        let mut out = String::new();

        if let Some(heading) = &doc.heading {
            writeln!(out, "{}", heading)?;
        }
        let body_start = out.len();
        if let Some(general) = &doc.general {
            self.write_general(&mut out, general)?;
        }
        if let Some(exceptions) = &doc.exceptions {
            self.write_exceptions(&mut out, exceptions)?;
        }
        if let Some(binary) = &doc.binary {
            self.write_binary(&mut out, binary)?;
        }
        if let Some(system) = &doc.system_info {
            self.write_system_info(&mut out, system)?;
        }

        if out.len() == body_start {
            return Err(ReportError::EmptyRender);
        }
        writeln!(out, "{}", self.config.separator)?;
        Ok(out)
    }

    fn heading(&self, out: &mut String, heading: &str) -> Result<()> {
        writeln!(out, "{}", self.config.separator)?;
        writeln!(out, "[{}]", heading)?;
        writeln!(out)?;
        Ok(())
    }

    fn write_general(&self, out: &mut String, general: &GeneralSection) -> Result<()> {
        self.heading(out, "General Info")?;
        let na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        writeln!(out, "Application: {}", na(&general.app_name))?;
        writeln!(out, "Version:     {}", na(&general.app_version))?;
        writeln!(out, "Region:      {}", na(&general.region))?;
        writeln!(out, "Machine:     {}", na(&general.machine_name))?;
        writeln!(out, "User:        {}", na(&general.user_name))?;
        writeln!(out, "Date:        {}", general.date_formatted())?;
        writeln!(out)?;
        if !general.title.is_empty() {
            writeln!(out, "Title: {}", general.title)?;
        }
        if !general.main_message.is_empty() {
            writeln!(out, "Message: {}", general.main_message)?;
        }
        if !general.further_instructions.is_empty() {
            writeln!(out, "Instructions: {}", general.further_instructions)?;
        }
        if let Some(explanation) = &general.user_explanation {
            writeln!(out, "User Explanation: {}", explanation)?;
        }
        if let Some(email) = &general.contact_email {
            writeln!(out, "Contact: {}", email)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_exceptions(&self, out: &mut String, exceptions: &ExceptionsSection) -> Result<()> {
        for entry in &exceptions.entries {
            self.heading(out, &format!("Exception Info {}", entry.index))?;
            if let Some(type_name) = &entry.type_name {
                writeln!(out, "Type:     {}", type_name)?;
            }
            writeln!(out, "Message:  {}", entry.message)?;
            if let Some(location) = &entry.location {
                writeln!(out, "Location: {}", location)?;
            }
            if !entry.causes.is_empty() {
                writeln!(out, "Caused by:")?;
                for (depth, cause) in entry.causes.iter().enumerate() {
                    writeln!(out, "{:indent$}- {}", "", cause, indent = 2 * (depth + 1))?;
                }
            }
            if !entry.backtrace.is_empty() {
                writeln!(out, "Backtrace:")?;
                for line in &entry.backtrace {
                    writeln!(out, "{}", line)?;
                }
                if entry.backtrace_truncated > 0 {
                    writeln!(out, "... {} more lines", entry.backtrace_truncated)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_binary(&self, out: &mut String, binary: &BinarySection) -> Result<()> {
        self.heading(out, "Binary Info")?;
        writeln!(out, "Name:     {}", binary.name)?;
        writeln!(out, "Path:     {}", binary.path)?;
        writeln!(out, "Size:     {}", binary.size_formatted())?;
        if let Some(modified) = binary.modified {
            writeln!(out, "Modified: {}", modified.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_system_info(&self, out: &mut String, system: &SystemInfoSection) -> Result<()> {
        self.heading(out, "System Info")?;
        for category in &system.categories {
            writeln!(out, "{}", category.name())?;
            for fact in category.facts() {
                writeln!(out, "-{}: {}", fact.key, fact.value)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl ReportFormatter for TextReportFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn format(&self, context: &ReportContext, sys_info: &[SysInfoResult]) -> Result<String> {
        let doc = ReportDocument::build(&self.config, context, sys_info);
        debug!(title = %doc.title(), categories = sys_info.len(), "Rendering text report");
        self.render(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportSections;
    use chrono::{TimeZone, Utc};
    use er_common::{BinaryIdentity, ExceptionInfo, RuntimeFacts, SysInfoQuery};

    fn stamped_context() -> ReportContext {
        let mut ctx = ReportContext::new()
            .with_title("Null reference")
            .with_main_message("Object reference not set")
            .with_contact_email("ops@example.com");
        ctx.stamp_runtime(RuntimeFacts {
            exception_date: Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap(),
            user_name: "alice".into(),
            machine_name: "build-01".into(),
            app_name: "editor".into(),
            app_version: "2.4.1".into(),
            region: "en-US".into(),
            app_binary: Some(BinaryIdentity {
                name: "editor".into(),
                path: "/opt/editor/bin/editor".into(),
                size_bytes: Some(2048),
                modified: None,
            }),
        });
        ctx
    }

    fn sys_info() -> Vec<SysInfoResult> {
        vec![
            SysInfoResult::new(SysInfoQuery::OperatingSystem).with_fact("Name", "TestOS"),
            SysInfoResult::new(SysInfoQuery::Machine).with_fact("CPU", "TestCPU"),
        ]
    }

    #[test]
    fn test_configured_heading_keeps_fault_title() {
        let formatter =
            TextReportFormatter::new(ReportConfig::new().with_title("Editor Crash Report"));
        let text = formatter.format(&stamped_context(), &sys_info()).unwrap();
        assert!(text.starts_with("Editor Crash Report\n"));
        assert!(text.contains("Title: Null reference"));
    }

    #[test]
    fn test_general_section_rendered() {
        let text = TextReportFormatter::default()
            .format(&stamped_context(), &sys_info())
            .unwrap();
        assert!(text.contains("[General Info]"));
        assert!(text.contains("Application: editor"));
        assert!(text.contains("Version:     2.4.1"));
        assert!(text.contains("User:        alice"));
        assert!(text.contains("Date:        2026-01-15 14:30:22 UTC"));
        assert!(text.contains("Title: Null reference"));
        assert!(text.contains("Contact: ops@example.com"));
    }

    #[test]
    fn test_system_info_keeps_probe_order() {
        let text = TextReportFormatter::default()
            .format(&stamped_context(), &sys_info())
            .unwrap();
        let os = text.find("Operating System").unwrap();
        let machine = text.find("\nMachine\n").unwrap();
        assert!(os < machine);
        assert!(text.contains("-Name: TestOS"));
        assert!(text.contains("-CPU: TestCPU"));
    }

    #[test]
    fn test_exception_chain_rendered() {
        let mut ctx = stamped_context();
        let mut exc = ExceptionInfo::new("failed to save").with_type_name("SaveError");
        exc.causes = vec!["disk full".into(), "quota".into()];
        ctx.add_exception(exc);
        ctx.add_exception(ExceptionInfo::new("second failure"));

        let text = TextReportFormatter::default().format(&ctx, &[]).unwrap();
        assert!(text.contains("[Exception Info 1]"));
        assert!(text.contains("Type:     SaveError"));
        assert!(text.contains("  - disk full"));
        assert!(text.contains("    - quota"));
        assert!(text.contains("[Exception Info 2]"));
    }

    #[test]
    fn test_binary_section_rendered() {
        let text = TextReportFormatter::default()
            .format(&stamped_context(), &[])
            .unwrap();
        assert!(text.contains("[Binary Info]"));
        assert!(text.contains("Path:     /opt/editor/bin/editor"));
        assert!(text.contains("Size:     2 KB"));
    }

    #[test]
    fn test_all_sections_hidden_is_error() {
        let config = ReportConfig::new().with_sections(ReportSections {
            general: false,
            exceptions: false,
            binary: false,
            system_info: false,
        });
        let err = TextReportFormatter::new(config)
            .format(&stamped_context(), &sys_info())
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptyRender));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let formatter = TextReportFormatter::new(ReportConfig::new().with_separator(""));
        assert!(matches!(
            formatter.format(&stamped_context(), &[]),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unstamped_context_shows_na() {
        let ctx = ReportContext::new().with_title("t");
        let text = TextReportFormatter::default().format(&ctx, &[]).unwrap();
        assert!(text.contains("Application: N/A"));
        assert!(text.contains("Date:        N/A"));
    }
}
