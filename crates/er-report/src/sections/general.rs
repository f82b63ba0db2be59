//! General info section data.

use chrono::{DateTime, Utc};
use er_common::ReportContext;
use serde::{Deserialize, Serialize};

/// Who, where and when: the application and account the fault happened under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSection {
    /// Report title.
    pub title: String,
    /// Main message shown to the user.
    pub main_message: String,
    /// Follow-up instructions.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub further_instructions: String,
    /// Application name.
    pub app_name: Option<String>,
    /// Application version.
    pub app_version: Option<String>,
    /// Culture/region display name.
    pub region: Option<String>,
    /// Host name.
    pub machine_name: Option<String>,
    /// OS account.
    pub user_name: Option<String>,
    /// When the fault was reported.
    pub exception_date: Option<DateTime<Utc>>,
    /// What the user was doing.
    pub user_explanation: Option<String>,
    /// Contact address.
    pub contact_email: Option<String>,
}

impl GeneralSection {
    /// Build from a context; runtime fields stay empty if it was never stamped.
    pub fn from_context(context: &ReportContext) -> Self {
        let runtime = context.runtime();
        Self {
            title: context.title.clone(),
            main_message: context.main_message.clone(),
            further_instructions: context.further_instructions.clone(),
            app_name: runtime.map(|r| r.app_name.clone()),
            app_version: runtime.map(|r| r.app_version.clone()),
            region: runtime.map(|r| r.region.clone()),
            machine_name: runtime.map(|r| r.machine_name.clone()),
            user_name: runtime.map(|r| r.user_name.clone()),
            exception_date: runtime.map(|r| r.exception_date),
            user_explanation: context.user_explanation.clone(),
            contact_email: context.contact_email.clone(),
        }
    }

    /// Date formatted for humans.
    pub fn date_formatted(&self) -> String {
        match self.exception_date {
            Some(date) => date.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "N/A".to_string(),
        }
    }
}
