use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::appointment::Appointment;
use super::conversation::Conversation;
use super::procedure::ProcedureRecord;
use super::report::Report;

/// A patient of the clinic and everything the portal shows about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub profile: Profile,
    pub notifications: Vec<Notification>,
    pub appointments: Vec<Appointment>,
    pub reports: Vec<Report>,
    pub conversations: Vec<Conversation>,
    pub performed_procedures: Vec<ProcedureRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub cpf: String,
    pub address: String,
    pub avatar_url: String,
}

impl Profile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// "Ana Silva" -> "AS"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub read: bool,
    pub title: String,
    pub description: String,
    pub time_label: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, time_label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            read: false,
            title: title.into(),
            description: description.into(),
            time_label: time_label.into(),
        }
    }
}

impl Client {
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn procedure(&self, procedure_id: Uuid) -> Option<&ProcedureRecord> {
        self.performed_procedures.iter().find(|p| p.id == procedure_id)
    }
}
