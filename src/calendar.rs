//! Agenda helpers: week grid, per-day listing, bookable slots and
//! appointment creation.
//!
//! Weeks start on Sunday. Booking only offers the fixed clinic times;
//! a slot is gone once a non-cancelled appointment or a block covers it.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::models::{Appointment, AppointmentStatus};
use crate::store::ScheduledAppointment;

/// Visit types offered by the booking dialog.
pub const VISIT_TYPES: [&str; 3] = ["Consulta de Rotina", "Avaliação de Procedimento", "Retorno"];

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Cannot book on a past day: {0}")]
    PastDay(NaiveDate),

    #[error("Slot not available: {0}")]
    SlotUnavailable(NaiveDateTime),

    #[error("Invalid slot time '{0}', expected HH:MM")]
    InvalidSlot(String),
}

/// What the booking dialog submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: String,
    /// Defaults to the clinic when absent.
    pub location: Option<String>,
}

/// Parses configured "HH:MM" slot strings, sorted ascending.
pub fn parse_slots(slots: &[String]) -> Result<Vec<NaiveTime>, CalendarError> {
    let mut times = slots
        .iter()
        .map(|s| NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| CalendarError::InvalidSlot(s.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    times.sort();
    times.dedup();
    Ok(times)
}

/// The Sunday-to-Saturday week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Appointments on `day`, in time order.
pub fn appointments_on(appointments: &[ScheduledAppointment], day: NaiveDate) -> Vec<&ScheduledAppointment> {
    let mut found: Vec<&ScheduledAppointment> = appointments
        .iter()
        .filter(|s| s.appointment.scheduled_at.date() == day)
        .collect();
    found.sort_by_key(|s| s.appointment.scheduled_at);
    found
}

pub fn is_bookable_day(day: NaiveDate, today: NaiveDate) -> bool {
    day >= today
}

/// Free slots on `day`. Past days have none. `taken` holds the start of
/// every booked or blocked slot.
pub fn available_slots<I>(day: NaiveDate, slots: &[NaiveTime], taken: I, today: NaiveDate) -> Vec<NaiveTime>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    if !is_bookable_day(day, today) {
        return Vec::new();
    }
    let taken: Vec<NaiveTime> = taken
        .into_iter()
        .filter(|at| at.date() == day)
        .map(|at| at.time())
        .collect();
    slots.iter().copied().filter(|t| !taken.contains(t)).collect()
}

/// Starts of every slot already spoken for: non-cancelled appointments
/// plus blocked times.
pub fn taken_slots<'a>(
    appointments: &'a [ScheduledAppointment],
    blocked: &'a [NaiveDateTime],
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    appointments
        .iter()
        .filter(|s| s.appointment.status != AppointmentStatus::Cancelled)
        .map(|s| s.appointment.scheduled_at)
        .chain(blocked.iter().copied())
}

/// Builds a confirmed appointment with the clinic's doctor.
pub fn new_appointment(request: &BookingRequest, today: NaiveDate) -> Result<Appointment, CalendarError> {
    if !is_bookable_day(request.date, today) {
        return Err(CalendarError::PastDay(request.date));
    }

    Ok(Appointment {
        id: Uuid::new_v4(),
        scheduled_at: request.date.and_time(request.time),
        doctor: config::DOCTOR_NAME.into(),
        appointment_type: request.appointment_type.clone(),
        status: AppointmentStatus::Confirmed,
        location: request
            .location
            .clone()
            .unwrap_or_else(|| config::CLINIC_NAME.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn default_slots() -> Vec<NaiveTime> {
        parse_slots(&crate::config::PortalConfig::default().booking_slots).unwrap()
    }

    fn scheduled(at: NaiveDateTime, status: AppointmentStatus) -> ScheduledAppointment {
        ScheduledAppointment {
            client_id: Uuid::new_v4(),
            client_name: "Ana Silva".into(),
            client_avatar: String::new(),
            appointment: Appointment {
                id: Uuid::new_v4(),
                scheduled_at: at,
                doctor: config::DOCTOR_NAME.into(),
                appointment_type: "Retorno".into(),
                status,
                location: "Online".into(),
            },
        }
    }

    // ── Week Tests ─────────────────────────────────────────

    #[test]
    fn week_starts_on_sunday() {
        // 2026-10-16 is a Friday
        let week = week_of(date(2026, 10, 16));
        assert_eq!(week[0], date(2026, 10, 11));
        assert_eq!(week[0].weekday(), Weekday::Sun);
        assert_eq!(week[6], date(2026, 10, 17));
    }

    #[test]
    fn week_of_sunday_is_itself() {
        assert_eq!(week_of(date(2026, 10, 11))[0], date(2026, 10, 11));
    }

    #[test]
    fn week_crosses_month_boundary() {
        let week = week_of(date(2026, 11, 2));
        assert_eq!(week[0], date(2026, 11, 1));
        let week = week_of(date(2026, 10, 1));
        assert_eq!(week[0], date(2026, 9, 27));
    }

    // ── Slot Tests ─────────────────────────────────────────

    #[test]
    fn parse_slots_sorts_and_rejects_garbage() {
        let slots = parse_slots(&["14:00".into(), "09:00".into()]).unwrap();
        assert_eq!(slots, vec![time(9, 0), time(14, 0)]);
        assert!(matches!(
            parse_slots(&["9h".into()]),
            Err(CalendarError::InvalidSlot(s)) if s == "9h"
        ));
    }

    #[test]
    fn all_slots_free_on_empty_day() {
        let today = date(2026, 10, 16);
        assert_eq!(available_slots(today, &default_slots(), [], today).len(), 6);
    }

    #[test]
    fn past_day_has_no_slots() {
        let today = date(2026, 10, 16);
        assert!(available_slots(date(2026, 10, 15), &default_slots(), [], today).is_empty());
    }

    #[test]
    fn booked_and_blocked_slots_removed() {
        let today = date(2026, 10, 16);
        let day = date(2026, 10, 20);
        let appointments = vec![
            scheduled(day.and_time(time(9, 0)), AppointmentStatus::Confirmed),
            scheduled(day.and_time(time(10, 0)), AppointmentStatus::Cancelled),
            scheduled(date(2026, 10, 21).and_time(time(11, 0)), AppointmentStatus::Confirmed),
        ];
        let blocked = vec![day.and_time(time(14, 0))];

        let free = available_slots(day, &default_slots(), taken_slots(&appointments, &blocked), today);
        assert_eq!(free, vec![time(10, 0), time(11, 0), time(15, 0), time(16, 0)]);
    }

    #[test]
    fn appointments_on_filters_and_sorts() {
        let day = date(2026, 10, 20);
        let appointments = vec![
            scheduled(day.and_time(time(15, 0)), AppointmentStatus::Confirmed),
            scheduled(date(2026, 10, 21).and_time(time(9, 0)), AppointmentStatus::Confirmed),
            scheduled(day.and_time(time(9, 0)), AppointmentStatus::Confirmed),
        ];
        let found = appointments_on(&appointments, day);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].appointment.scheduled_at.time(), time(9, 0));
    }

    // ── Booking Tests ──────────────────────────────────────

    #[test]
    fn new_appointment_defaults() {
        let request = BookingRequest {
            date: date(2026, 10, 20),
            time: time(10, 0),
            appointment_type: VISIT_TYPES[0].into(),
            location: None,
        };
        let appt = new_appointment(&request, date(2026, 10, 16)).unwrap();
        assert_eq!(appt.scheduled_at, date(2026, 10, 20).and_time(time(10, 0)));
        assert_eq!(appt.status, AppointmentStatus::Confirmed);
        assert_eq!(appt.doctor, "Dra. Flavia Novis");
        assert_eq!(appt.location, "Clínica DermApp");
    }

    #[test]
    fn booking_today_allowed_past_rejected() {
        let today = date(2026, 10, 16);
        let mut request = BookingRequest {
            date: today,
            time: time(16, 0),
            appointment_type: "Retorno".into(),
            location: Some("Online".into()),
        };
        assert_eq!(new_appointment(&request, today).unwrap().location, "Online");

        request.date = date(2026, 10, 1);
        assert!(matches!(new_appointment(&request, today), Err(CalendarError::PastDay(_))));
    }
}
