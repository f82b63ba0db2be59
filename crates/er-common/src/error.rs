//! Error types for fault report generation.
//!
//! The taxonomy mirrors how a report episode can go wrong:
//! - Argument errors stop the generator before any report exists
//! - Probe errors degrade a single system-info category and are never fatal
//! - Formatting errors leave the caller without an artifact
//! - Serialization errors come from loading or saving report settings

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sysinfo::SysInfoQuery;

/// Result type alias for fault report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid inputs handed to the generator.
    Argument,
    /// Host fact retrieval.
    Probe,
    /// Rendering the final artifact.
    Formatting,
    /// Encoding or decoding report settings.
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Argument => write!(f, "argument"),
            ErrorCategory::Probe => write!(f, "probe"),
            ErrorCategory::Formatting => write!(f, "formatting"),
            ErrorCategory::Serialization => write!(f, "serialization"),
        }
    }
}

/// Unified error type for fault reporting.
#[derive(Error, Debug)]
pub enum Error {
    // Argument errors (10-19)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("report context has already been released")]
    ContextReleased,

    // Probe errors (20-29)
    #[error("system info query '{query}' failed: {reason}")]
    ProbeFailure { query: SysInfoQuery, reason: String },

    // Formatting errors (30-39)
    #[error("formatter '{formatter}' failed: {reason}")]
    Formatting { formatter: String, reason: String },

    // Serialization errors (60-69)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error.
    ///
    /// - 10-19: Argument errors
    /// - 20-29: Probe errors
    /// - 30-39: Formatting errors
    /// - 60-69: Serialization errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidArgument(_) => 10,
            Error::ContextReleased => 11,
            Error::ProbeFailure { .. } => 20,
            Error::Formatting { .. } => 30,
            Error::Json(_) => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidArgument(_) | Error::ContextReleased => ErrorCategory::Argument,
            Error::ProbeFailure { .. } => ErrorCategory::Probe,
            Error::Formatting { .. } => ErrorCategory::Formatting,
            Error::Json(_) => ErrorCategory::Serialization,
        }
    }

    /// Whether this error prevents a report from being produced.
    ///
    /// Probe failures only remove one category from the report, so the
    /// embedding application can still show something.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ProbeFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_grouped_by_category() {
        let cases = [
            (Error::InvalidArgument("context".into()), 10, ErrorCategory::Argument),
            (Error::ContextReleased, 11, ErrorCategory::Argument),
            (
                Error::ProbeFailure {
                    query: SysInfoQuery::Machine,
                    reason: "boom".into(),
                },
                20,
                ErrorCategory::Probe,
            ),
            (
                Error::Formatting {
                    formatter: "text".into(),
                    reason: "empty".into(),
                },
                30,
                ErrorCategory::Formatting,
            ),
        ];
        for (err, code, category) in cases {
            assert_eq!(err.code(), code, "{err}");
            assert_eq!(err.category(), category, "{err}");
        }
    }

    #[test]
    fn test_probe_failure_is_not_fatal() {
        let err = Error::ProbeFailure {
            query: SysInfoQuery::OperatingSystem,
            reason: "uname failed".into(),
        };
        assert!(!err.is_fatal());
        assert!(Error::InvalidArgument("x".into()).is_fatal());
        assert!(Error::Formatting {
            formatter: "text".into(),
            reason: "x".into()
        }
        .is_fatal());
    }

    #[test]
    fn test_probe_failure_message_names_query() {
        let err = Error::ProbeFailure {
            query: SysInfoQuery::Machine,
            reason: "no meminfo".into(),
        };
        assert_eq!(
            err.to_string(),
            "system info query 'Machine' failed: no meminfo"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json.into();
        assert_eq!(err.code(), 60);
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert!(err.is_fatal());
    }
}
