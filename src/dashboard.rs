//! Dashboard view models for both portal roles.
//!
//! Each dashboard is a single read over the store, assembled in one call
//! so the view never stitches pieces together itself.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Appointment, Client, Conversation, ProcedureRecord, Report};
use crate::store::{ClinicStore, ScheduledAppointment};
use crate::timeline::{key_indicators_with_limit, KeyIndicators};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Doctor home: the clinic at a glance.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorDashboard {
    pub doctor_name: String,
    /// Future appointments of every client, soonest first.
    pub upcoming: Vec<ScheduledAppointment>,
    pub total_clients: usize,
    /// Indicators over every client's procedures.
    pub indicators: KeyIndicators,
}

/// Patient home for one client.
#[derive(Debug, Clone, Serialize)]
pub struct PatientDashboard {
    pub first_name: String,
    pub next_appointment: Option<Appointment>,
    pub latest_report: Option<Report>,
    pub recent_conversation: Option<Conversation>,
    pub unread_notifications: usize,
    pub indicators: KeyIndicators,
    /// Procedures with at least one photo, in list order.
    pub procedures_with_photos: Vec<ProcedureRecord>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn doctor_dashboard(store: &ClinicStore, now: NaiveDateTime, top_n: usize) -> DoctorDashboard {
    let upcoming: Vec<ScheduledAppointment> = store
        .all_appointments()
        .into_iter()
        .filter(|s| s.appointment.is_upcoming(now))
        .collect();

    DoctorDashboard {
        doctor_name: store.doctor().name.clone(),
        upcoming,
        total_clients: store.clients().len(),
        indicators: key_indicators_with_limit(store.all_procedures(), now.date(), top_n),
    }
}

pub fn patient_dashboard(client: &Client, now: NaiveDateTime, top_n: usize) -> PatientDashboard {
    let next_appointment = client
        .appointments
        .iter()
        .filter(|a| a.is_upcoming(now))
        .min_by_key(|a| a.scheduled_at)
        .cloned();

    // Ties keep the first in list order, which is newest first.
    let latest_report = client
        .reports
        .iter()
        .rev()
        .max_by_key(|r| r.date)
        .cloned();

    PatientDashboard {
        first_name: client.profile.first_name().to_string(),
        next_appointment,
        latest_report,
        recent_conversation: client.conversations.first().cloned(),
        unread_notifications: client.unread_notifications(),
        indicators: key_indicators_with_limit(&client.performed_procedures, now.date(), top_n),
        procedures_with_photos: client
            .performed_procedures
            .iter()
            .filter(|p| p.has_photos())
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{AppointmentStatus, ProcedureType, ReportStatus};
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(12, 0, 0).unwrap()
    }

    fn appointment(offset_days: i64) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            scheduled_at: now() + Duration::days(offset_days),
            doctor: "Dra. Flavia Novis".into(),
            appointment_type: "Retorno".into(),
            status: AppointmentStatus::Confirmed,
            location: "Online".into(),
        }
    }

    fn report(date: NaiveDate, report_type: &str) -> Report {
        Report {
            id: Uuid::new_v4(),
            date,
            report_type: report_type.into(),
            doctor: "Dra. Flavia Novis".into(),
            status: ReportStatus::Available,
        }
    }

    // ── Doctor ─────────────────────────────────────────────

    #[test]
    fn doctor_sees_only_future_appointments_ascending() {
        let store = fixtures::clinic_store(today(), 42);
        let dash = doctor_dashboard(&store, now(), 3);

        assert_eq!(dash.total_clients, 3);
        assert_eq!(dash.upcoming.len(), 3);
        assert!(dash.upcoming.iter().all(|s| s.appointment.scheduled_at > now()));
        assert!(dash
            .upcoming
            .windows(2)
            .all(|w| w[0].appointment.scheduled_at <= w[1].appointment.scheduled_at));
        assert_eq!(dash.upcoming[0].client_name, "Ana Silva");
    }

    #[test]
    fn doctor_indicators_cover_all_clients() {
        let store = fixtures::clinic_store(today(), 42);
        let dash = doctor_dashboard(&store, now(), 3);
        let total = store.all_procedures().count() as u32;
        assert_eq!(dash.indicators.year_total(), total);
        assert_eq!(dash.indicators.chart.len(), 10);
    }

    // ── Patient ────────────────────────────────────────────

    #[test]
    fn patient_dashboard_picks_next_and_latest() {
        let mut client = fixtures::clients(today(), 1).remove(0);
        client.appointments = vec![appointment(-2), appointment(9), appointment(3)];
        client.reports = vec![
            report(today() - Duration::days(30), "Dermatoscopia"),
            report(today() - Duration::days(1), "Exame de Sangue"),
        ];

        let dash = patient_dashboard(&client, now(), 3);
        assert_eq!(dash.first_name, "Ana");
        assert_eq!(
            dash.next_appointment.unwrap().scheduled_at,
            now() + Duration::days(3)
        );
        assert_eq!(dash.latest_report.unwrap().report_type, "Exame de Sangue");
        assert_eq!(dash.unread_notifications, 2);
    }

    #[test]
    fn patient_without_history() {
        let mut client = fixtures::clients(today(), 1).remove(0);
        client.appointments.clear();
        client.reports.clear();
        client.conversations.clear();
        client.performed_procedures.clear();

        let dash = patient_dashboard(&client, now(), 3);
        assert!(dash.next_appointment.is_none());
        assert!(dash.latest_report.is_none());
        assert!(dash.recent_conversation.is_none());
        assert!(dash.procedures_with_photos.is_empty());
        assert_eq!(dash.indicators.year_total(), 0);
    }

    #[test]
    fn patient_photo_list_skips_routine() {
        let client = fixtures::clients(today(), 8).remove(1);
        let dash = patient_dashboard(&client, now(), 3);
        assert!(dash
            .procedures_with_photos
            .iter()
            .all(|p| p.procedure_type != ProcedureType::Rotina));
    }
}
