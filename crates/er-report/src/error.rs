//! Error types for report rendering.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writing into the output buffer failed.
    #[error("write error: {0}")]
    WriteError(#[from] std::fmt::Error),

    /// The renderer produced no output.
    #[error("rendered report is empty")]
    EmptyRender,

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
