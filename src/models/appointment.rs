use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub scheduled_at: NaiveDateTime,
    pub doctor: String,
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub location: String,
}

impl Appointment {
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.scheduled_at > now
    }
}
