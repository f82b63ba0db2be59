//! Report identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier correlating one report episode across logs and the artifact.
///
/// Format: `rpt-<12 hex chars>`
/// Example: `rpt-3f2a9c01b7de`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
    /// Generate a new report ID.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        ReportId(format!("rpt-{}", &uuid[..12]))
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
