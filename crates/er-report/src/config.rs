//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Report section visibility configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSections {
    /// General info (application, user, machine, messages).
    #[serde(default = "default_true")]
    pub general: bool,
    /// Exception details.
    #[serde(default = "default_true")]
    pub exceptions: bool,
    /// Entry binary identity.
    #[serde(default = "default_true")]
    pub binary: bool,
    /// Operating system and machine facts.
    #[serde(default = "default_true")]
    pub system_info: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            general: true,
            exceptions: true,
            binary: true,
            system_info: true,
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Title override; falls back to the context title.
    pub title: Option<String>,
    /// Section visibility.
    #[serde(default)]
    pub sections: ReportSections,
    /// Maximum backtrace lines per exception (0 keeps everything).
    #[serde(default = "default_max_backtrace_lines")]
    pub max_backtrace_lines: usize,
    /// Line drawn between text sections.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_max_backtrace_lines() -> usize {
    200
}

fn default_separator() -> String {
    "-".repeat(40)
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            sections: ReportSections::default(),
            max_backtrace_lines: default_max_backtrace_lines(),
            separator: default_separator(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set section visibility.
    pub fn with_sections(mut self, sections: ReportSections) -> Self {
        self.sections = sections;
        self
    }

    /// Limit backtrace length.
    pub fn with_max_backtrace_lines(mut self, lines: usize) -> Self {
        self.max_backtrace_lines = lines;
        self
    }

    /// Set the section separator line.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Check the configuration can drive a renderer.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(ReportError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        if self.separator.contains('\n') {
            return Err(ReportError::InvalidConfig(
                "separator must be a single line".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration persisted by the embedding application.
    pub fn from_json(json: &str) -> er_common::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> er_common::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
