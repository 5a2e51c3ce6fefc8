//! Late-result follow-ups.
//!
//! Each catalog entry carries a follow-up delay. A procedure becomes due
//! for a "Resultados Tardios" evaluation `delay_days` after it was
//! performed, and stays pending until an after photo dated on or after
//! the due date documents the evaluation. This is a read-only derivation;
//! nothing is scheduled or sent.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::locale;
use crate::models::{Notification, ProcedureConfig, ProcedureRecord, ProcedureType};

pub const FOLLOW_UP_TITLE: &str = "Resultados Tardios";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUpReminder {
    pub procedure_id: Uuid,
    pub procedure_type: ProcedureType,
    pub performed_at: NaiveDate,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
}

impl FollowUpReminder {
    pub fn to_notification(&self) -> Notification {
        let time_label = match self.days_overdue {
            0 => "hoje".to_string(),
            1 => "há 1 dia".to_string(),
            n => format!("há {n} dias"),
        };
        Notification::new(
            FOLLOW_UP_TITLE,
            format!(
                "Hora de avaliar os resultados do seu procedimento de {} realizado em {}.",
                self.procedure_type.display_name(),
                locale::format_date(self.performed_at)
            ),
            time_label,
        )
    }
}

/// Pending follow-ups, earliest due first.
pub fn pending_follow_ups<'a, I>(procedures: I, catalog: &[ProcedureConfig], today: NaiveDate) -> Vec<FollowUpReminder>
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    let mut reminders: Vec<FollowUpReminder> = procedures
        .into_iter()
        .filter_map(|record| {
            let delay = catalog
                .iter()
                .find(|c| c.procedure_type == record.procedure_type)
                .map(|c| c.delay_days)
                .filter(|d| *d > 0)?;
            let due_date = record.performed_at + Duration::days(delay as i64);
            if due_date > today {
                return None;
            }
            let evaluated = record.after_images.iter().any(|img| img.taken_at >= due_date);
            if evaluated {
                return None;
            }
            Some(FollowUpReminder {
                procedure_id: record.id,
                procedure_type: record.procedure_type,
                performed_at: record.performed_at,
                due_date,
                days_overdue: (today - due_date).num_days(),
            })
        })
        .collect();

    reminders.sort_by_key(|r| r.due_date);
    tracing::debug!(pending = reminders.len(), today = %today, "Follow-ups derived");
    reminders
}
