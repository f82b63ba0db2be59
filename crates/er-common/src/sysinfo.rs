//! System information query kinds and results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of host-environment query a probe can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SysInfoQuery {
    /// Operating system name, version, kernel and architecture.
    OperatingSystem,
    /// Machine hardware: host name, processor, memory.
    Machine,
}

impl SysInfoQuery {
    /// Queries every report runs, in the order they appear in the report.
    pub const CANONICAL: [SysInfoQuery; 2] = [SysInfoQuery::OperatingSystem, SysInfoQuery::Machine];

    /// Category heading used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            SysInfoQuery::OperatingSystem => "Operating System",
            SysInfoQuery::Machine => "Machine",
        }
    }
}

impl fmt::Display for SysInfoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysInfoQuery::OperatingSystem => write!(f, "OperatingSystem"),
            SysInfoQuery::Machine => write!(f, "Machine"),
        }
    }
}

/// A single key/value fact about the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysInfoFact {
    pub key: String,
    pub value: String,
}

/// A named category of host facts.
///
/// Facts keep the order the probe produced them in. Once built the result is
/// only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysInfoResult {
    query: SysInfoQuery,
    name: String,
    facts: Vec<SysInfoFact>,
}

impl SysInfoResult {
    /// Start an empty result for a query kind.
    pub fn new(query: SysInfoQuery) -> Self {
        Self {
            query,
            name: query.display_name().to_string(),
            facts: Vec::new(),
        }
    }

    /// Append a fact.
    pub fn with_fact(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.facts.push(SysInfoFact {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Append a fact only when the value is known.
    pub fn with_optional_fact(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_fact(key, value),
            None => self,
        }
    }

    pub fn query(&self) -> SysInfoQuery {
        self.query
    }

    /// Category name, e.g. "Operating System".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn facts(&self) -> &[SysInfoFact] {
        &self.facts
    }

    /// Look up a fact value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
