//! System info section data.

use er_common::SysInfoResult;
use serde::{Deserialize, Serialize};

/// Host fact categories in probe order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfoSection {
    pub categories: Vec<SysInfoResult>,
}

impl SystemInfoSection {
    pub fn new(results: &[SysInfoResult]) -> Self {
        Self {
            categories: results.to_vec(),
        }
    }
}
