use serde::{Deserialize, Serialize};

use super::enums::ProcedureType;

/// The clinician running the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub bio: String,
    pub practiced_procedures: Vec<ProcedureType>,
    pub notification_settings: NotificationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub new_appointments: bool,
    pub chat_messages: bool,
    pub report_available: bool,
}

impl Doctor {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}
