//! Exception section data.

use er_common::ExceptionInfo;
use serde::{Deserialize, Serialize};

/// One exception as rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionEntry {
    /// 1-based position in the report.
    pub index: usize,
    pub type_name: Option<String>,
    pub message: String,
    pub location: Option<String>,
    pub causes: Vec<String>,
    /// Backtrace lines after truncation.
    pub backtrace: Vec<String>,
    /// Lines dropped by truncation.
    pub backtrace_truncated: usize,
}

/// All exceptions attached to the context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExceptionsSection {
    pub entries: Vec<ExceptionEntry>,
}

impl ExceptionsSection {
    /// Build entries, keeping at most `max_backtrace_lines` lines of each
    /// backtrace (0 keeps all).
    pub fn from_exceptions(exceptions: &[ExceptionInfo], max_backtrace_lines: usize) -> Self {
        let entries = exceptions
            .iter()
            .enumerate()
            .map(|(i, exc)| {
                let lines: Vec<String> = exc
                    .backtrace
                    .as_deref()
                    .map(|bt| bt.lines().map(str::to_string).collect())
                    .unwrap_or_default();
                let keep = if max_backtrace_lines == 0 {
                    lines.len()
                } else {
                    lines.len().min(max_backtrace_lines)
                };
                let truncated = lines.len() - keep;
                ExceptionEntry {
                    index: i + 1,
                    type_name: exc.type_name.clone(),
                    message: exc.message.clone(),
                    location: exc.location.clone(),
                    causes: exc.causes.clone(),
                    backtrace: lines.into_iter().take(keep).collect(),
                    backtrace_truncated: truncated,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
