//! Logging configuration.
//!
//! Resolved from `ER_LOG`, `RUST_LOG` and `ER_LOG_FORMAT`, with explicit
//! overrides from the embedding application taking precedence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Where diagnostics are meant to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines for a person at a terminal.
    #[default]
    Human,
    /// One JSON object per event, for collectors.
    Jsonl,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity that is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Most verbose first, so a directive list resolves to its loudest level.
    const BY_VERBOSITY: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// Loudest level named anywhere in an `EnvFilter` directive string,
    /// e.g. `warn,er_core=debug` yields `Debug`.
    fn loudest_in_directives(directives: &str) -> Option<LogLevel> {
        let named: Vec<LogLevel> = directives
            .split(',')
            .filter_map(|d| d.rsplit('=').next())
            .filter_map(|level| level.parse().ok())
            .collect();
        Self::BY_VERBOSITY
            .into_iter()
            .find(|level| named.contains(level))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human lines with a timestamp.
    pub timestamps: bool,
    /// Attach file and line to every event.
    pub source_location: bool,
    /// Raw `RUST_LOG` directives, kept only when nothing shadowed them.
    pub directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::default(),
            timestamps: true,
            source_location: false,
            directives: None,
        }
    }
}

impl LogConfig {
    /// Resolve from the process environment plus explicit overrides.
    pub fn from_env(level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self::from_vars(
            var("ER_LOG").as_deref(),
            var("RUST_LOG").as_deref(),
            var("ER_LOG_FORMAT").as_deref(),
            level,
            format,
        )
    }

    /// Resolve from raw variable values.
    ///
    /// `ER_LOG` names a single level and shadows `RUST_LOG`. Unparseable
    /// values are ignored. Explicit overrides always win. The full `RUST_LOG`
    /// directive string is kept only when neither `ER_LOG` nor an explicit
    /// level shadowed it.
    pub fn from_vars(
        er_log: Option<&str>,
        rust_log: Option<&str>,
        er_log_format: Option<&str>,
        level: Option<LogLevel>,
        format: Option<LogFormat>,
    ) -> Self {
        let env_level = match er_log {
            Some(val) => val.parse().ok(),
            None => rust_log.and_then(LogLevel::loudest_in_directives),
        };
        let env_format = er_log_format.and_then(|val| val.parse().ok());

        let directives = match (level, er_log) {
            (None, None) => rust_log
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            _ => None,
        };

        let defaults = Self::default();
        Self {
            level: level.or(env_level).unwrap_or(defaults.level),
            format: format.or(env_format).unwrap_or(defaults.format),
            directives,
            ..defaults
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.directives = None;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_source_location(mut self, enabled: bool) -> Self {
        self.source_location = enabled;
        self
    }
}
