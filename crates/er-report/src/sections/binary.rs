//! Entry binary section data.

use chrono::{DateTime, Utc};
use er_common::BinaryIdentity;
use serde::{Deserialize, Serialize};

/// The executable the fault happened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySection {
    pub name: String,
    pub path: String,
    pub size_bytes: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
}

impl From<&BinaryIdentity> for BinarySection {
    fn from(identity: &BinaryIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            path: identity.path.clone(),
            size_bytes: identity.size_bytes,
            modified: identity.modified,
        }
    }
}

impl BinarySection {
    /// Get formatted size.
    pub fn size_formatted(&self) -> String {
        match self.size_bytes {
            Some(bytes) if bytes >= 1_048_576 => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
            Some(bytes) if bytes >= 1024 => format!("{:.0} KB", bytes as f64 / 1024.0),
            Some(bytes) => format!("{} B", bytes),
            None => "N/A".to_string(),
        }
    }
}
