//! Mock clinic data.
//!
//! The portal has no backend; every start rebuilds the clinic from these
//! fixtures. Generation is driven by a seeded `StdRng` so the same seed and
//! date always produce the same clinic. Appointment and report dates are
//! placed relative to `today` so dashboards always have something upcoming.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::config;
use crate::models::{
    default_catalog, AfterImage, Appointment, AppointmentStatus, Client, Conversation, Doctor,
    Message, Notification, NotificationSettings, ProcedureRecord, ProcedureType, Profile, Report,
    ReportStatus,
};
use crate::store::{ClinicStore, CLINIC_AVATAR};

/// Days between consecutive "after" photos of a generated procedure.
const AFTER_PHOTO_SPACING_DAYS: i64 = 15;

const DOCTOR_AVATAR: &str = "https://img.usecurling.com/ppl/medium?gender=female&seed=10";

pub fn doctor() -> Doctor {
    Doctor {
        name: config::DOCTOR_NAME.into(),
        email: "flavia.novis@derma.com".into(),
        avatar_url: DOCTOR_AVATAR.into(),
        bio: "Dermatologista especialista em procedimentos estéticos e cuidados com a pele. \
              Focada em resultados naturais e na saúde integral dos pacientes."
            .into(),
        practiced_procedures: vec![ProcedureType::Botox, ProcedureType::Preenchimento],
        notification_settings: NotificationSettings {
            new_appointments: true,
            chat_messages: true,
            report_available: false,
        },
    }
}

/// The whole clinic: doctor, clients and the default catalog.
pub fn clinic_store(today: NaiveDate, seed: u64) -> ClinicStore {
    ClinicStore::new(doctor(), clients(today, seed), default_catalog())
}

pub fn clients(today: NaiveDate, seed: u64) -> Vec<Client> {
    let mut rng = StdRng::seed_from_u64(seed);
    let clients = vec![ana_silva(&mut rng, today), bruno_costa(&mut rng, today), carla_dias(&mut rng, today)];
    tracing::debug!(
        clients = clients.len(),
        procedures = clients.iter().map(|c| c.performed_procedures.len()).sum::<usize>(),
        seed,
        "Fixtures generated"
    );
    clients
}

/// One to three procedures per elapsed month of `today`'s year, newest
/// first. Routine visits carry no photos; the rest get a before photo and
/// one to three after photos.
pub fn generate_procedures(rng: &mut StdRng, today: NaiveDate) -> Vec<ProcedureRecord> {
    let year = today.year();
    let mut procedures = Vec::new();
    let mut seed_counter: u32 = 1;

    for month in 1..=today.month() {
        let days = days_in_month(year, month);
        let count = rng.gen_range(1..=3);

        for _ in 0..count {
            let day = rng.gen_range(1..=days);
            let Some(performed_at) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let procedure_type = *ProcedureType::ALL
                .choose(rng)
                .unwrap_or(&ProcedureType::Rotina);

            let mut record = ProcedureRecord {
                id: next_id(rng),
                ..ProcedureRecord::new(performed_at, procedure_type)
            };

            if procedure_type.takes_photos() {
                let query = procedure_type.display_name().replace(' ', "%20");
                record.before_image = Some(photo_url(&query, "before", seed_counter));

                let after_count = rng.gen_range(1..=3);
                record.after_images = (0..after_count)
                    .map(|j| AfterImage {
                        uri: photo_url(&query, "after", seed_counter + j + 1),
                        taken_at: performed_at + Duration::days(AFTER_PHOTO_SPACING_DAYS * (j as i64 + 1)),
                    })
                    .collect();
            }

            seed_counter += 1;
            procedures.push(record);
        }
    }

    procedures.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
    procedures
}

fn photo_url(query: &str, side: &str, seed: u32) -> String {
    format!("https://img.usecurling.com/p/800/600?q={query}%20{side}&seed={seed}")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Random v4 ids drawn from the fixture rng, so ids are reproducible too.
fn next_id(rng: &mut StdRng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

// ── Clients ────────────────────────────────────────────────────────────────

fn at(day: NaiveDate, offset_days: i64, hour: u32, minute: u32) -> NaiveDateTime {
    (day + Duration::days(offset_days))
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN))
}

fn appointment(
    rng: &mut StdRng,
    scheduled_at: NaiveDateTime,
    appointment_type: &str,
    status: AppointmentStatus,
    location: &str,
) -> Appointment {
    Appointment {
        id: next_id(rng),
        scheduled_at,
        doctor: config::DOCTOR_NAME.into(),
        appointment_type: appointment_type.into(),
        status,
        location: location.into(),
    }
}

fn report(rng: &mut StdRng, date: NaiveDate, report_type: &str, status: ReportStatus) -> Report {
    Report {
        id: next_id(rng),
        date,
        report_type: report_type.into(),
        doctor: config::DOCTOR_NAME.into(),
        status,
    }
}

fn notification(rng: &mut StdRng, read: bool, title: &str, description: &str, time_label: &str) -> Notification {
    Notification {
        id: next_id(rng),
        read,
        ..Notification::new(title, description, time_label)
    }
}

fn message(rng: &mut StdRng, sender: &str, text: &str, timestamp_label: &str, read: bool) -> Message {
    Message {
        id: next_id(rng),
        read,
        ..Message::new(sender, text, timestamp_label)
    }
}

/// Takes the rng last so the messages can be built inline.
fn conversation(
    contact_name: &str,
    contact_avatar: &str,
    messages: Vec<Message>,
    rng: &mut StdRng,
) -> Conversation {
    let last = messages.last();
    Conversation {
        id: next_id(rng),
        contact_name: contact_name.into(),
        contact_avatar: contact_avatar.into(),
        last_message: last.map(|m| m.text.clone()).unwrap_or_default(),
        timestamp_label: last.map(|m| m.timestamp_label.clone()).unwrap_or_default(),
        unread_count: messages.iter().filter(|m| !m.read).count() as u32,
        messages,
    }
}

fn profile(name: &str, email: &str, phone: &str, dob: (i32, u32, u32), cpf: &str, address: &str, avatar: &str) -> Profile {
    Profile {
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        date_of_birth: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2),
        cpf: cpf.into(),
        address: address.into(),
        avatar_url: avatar.into(),
    }
}

fn ana_silva(rng: &mut StdRng, today: NaiveDate) -> Client {
    let clinic = config::CLINIC_CONTACT;
    let doctor = config::DOCTOR_NAME;
    let room = "Clínica DermApp, Sala 3";

    Client {
        id: next_id(rng),
        profile: profile(
            "Ana Silva",
            "ana.silva@example.com",
            "(11) 98765-4321",
            (1990, 5, 15),
            "123.456.789-00",
            "Rua das Flores, 123, São Paulo, SP",
            "https://img.usecurling.com/ppl/medium?gender=female&seed=1",
        ),
        notifications: vec![
            notification(rng, false, "Novo laudo disponível", "Seu exame de Biópsia de Pele está pronto.", "há 5 minutos"),
            notification(rng, false, "Lembrete de consulta", "Sua consulta com Dra. Flavia é amanhã às 10:00.", "há 2 horas"),
        ],
        appointments: vec![
            appointment(rng, at(today, -26, 9, 0), "Retorno", AppointmentStatus::Completed, room),
            appointment(rng, at(today, 12, 10, 0), "Consulta de Rotina", AppointmentStatus::Confirmed, room),
        ],
        reports: vec![
            report(rng, today - Duration::days(4), "Biópsia de Pele", ReportStatus::Available),
            report(rng, today - Duration::days(41), "Dermatoscopia", ReportStatus::Available),
        ],
        conversations: vec![
            conversation(clinic, CLINIC_AVATAR, vec![
                message(rng, clinic, "Olá Ana, seus resultados de exame já estão disponíveis no app.", "10:40", true),
                message(rng, "Ana Silva", "Ótimo, muito obrigada por avisar!", "10:42", false),
            ], rng),
            conversation(doctor, DOCTOR_AVATAR, vec![
                message(rng, doctor, "Olá Ana, como você está se sentindo após o procedimento?", "Ontem 15:00", true),
                message(rng, "Ana Silva", "Estou me sentindo bem, obrigada por perguntar!", "Ontem 15:05", true),
                message(rng, doctor, "Que ótimo! Estou à disposição para qualquer dúvida.", "Ontem 15:06", true),
            ], rng),
        ],
        performed_procedures: generate_procedures(rng, today),
    }
}

fn bruno_costa(rng: &mut StdRng, today: NaiveDate) -> Client {
    let clinic = config::CLINIC_CONTACT;
    let doctor = config::DOCTOR_NAME;

    Client {
        id: next_id(rng),
        profile: profile(
            "Bruno Costa",
            "bruno.costa@example.com",
            "(21) 91234-5678",
            (1985, 8, 22),
            "098.765.432-11",
            "Avenida Copacabana, 456, Rio de Janeiro, RJ",
            "https://img.usecurling.com/ppl/medium?gender=male&seed=2",
        ),
        notifications: vec![notification(
            rng,
            true,
            "Consulta confirmada",
            "Sua consulta de rotina foi confirmada.",
            "há 3 dias",
        )],
        appointments: vec![
            appointment(rng, at(today, -15, 11, 0), "Consulta de Rotina", AppointmentStatus::Completed, "Clínica DermApp, Sala 3"),
            appointment(rng, at(today, 30, 14, 30), "Procedimento a Laser", AppointmentStatus::Confirmed, "Online"),
        ],
        reports: vec![report(rng, today - Duration::days(2), "Exame de Sangue", ReportStatus::Available)],
        conversations: vec![
            conversation(clinic, CLINIC_AVATAR, vec![
                message(rng, clinic, "Olá Bruno, apenas um lembrete amigável sobre sua consulta na próxima semana.", "Ontem 11:00", true),
                message(rng, "Bruno Costa", "Confirmado, obrigado!", "Ontem 11:05", true),
            ], rng),
            conversation(doctor, DOCTOR_AVATAR, vec![
                message(rng, "Bruno Costa", "Doutora, confirmei meu procedimento a laser para o dia 15.", "Há 2 dias 09:30", true),
                message(rng, doctor, "Perfeito, nos vemos lá!", "Há 2 dias 09:32", true),
            ], rng),
        ],
        performed_procedures: generate_procedures(rng, today),
    }
}

fn carla_dias(rng: &mut StdRng, today: NaiveDate) -> Client {
    let clinic = config::CLINIC_CONTACT;
    let doctor = config::DOCTOR_NAME;

    Client {
        id: next_id(rng),
        profile: profile(
            "Carla Dias",
            "carla.dias@example.com",
            "(31) 95555-4444",
            (1992, 1, 30),
            "111.222.333-44",
            "Rua da Bahia, 789, Belo Horizonte, MG",
            "https://img.usecurling.com/ppl/medium?gender=female&seed=3",
        ),
        notifications: vec![notification(
            rng,
            false,
            "Nova mensagem",
            "Você tem uma nova mensagem da clínica.",
            "há 1 hora",
        )],
        appointments: vec![
            appointment(rng, at(today, -6, 15, 0), "Consulta de Rotina", AppointmentStatus::Completed, "Online"),
            appointment(rng, at(today, 20, 16, 0), "Avaliação Estética", AppointmentStatus::Confirmed, "Clínica DermApp, Sala 3"),
        ],
        reports: vec![report(rng, today, "Análise de Pele", ReportStatus::InReview)],
        conversations: vec![
            conversation(clinic, CLINIC_AVATAR, vec![
                message(rng, "Carla Dias", "Olá, estou com uma dúvida sobre o pós-procedimento.", "14:28", true),
                message(rng, clinic, "Olá Carla, claro. Poderia me enviar uma foto da região?", "14:30", false),
            ], rng),
            conversation(doctor, DOCTOR_AVATAR, vec![
                message(rng, "Carla Dias", "Doutora, a pele está um pouco vermelha após a avaliação. É normal?", "14:33", true),
                message(rng, doctor, "Olá Carla, sim, é uma reação esperada. Sim, pode aplicar o creme que recomendei.", "14:35", true),
            ], rng),
        ],
        performed_procedures: generate_procedures(rng, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn same_seed_same_clinic() {
        assert_eq!(clients(today(), 7), clients(today(), 7));
    }

    #[test]
    fn three_clients_in_order() {
        let names: Vec<String> = clients(today(), 1).into_iter().map(|c| c.profile.name).collect();
        assert_eq!(names, vec!["Ana Silva", "Bruno Costa", "Carla Dias"]);
    }

    #[test]
    fn procedures_cover_elapsed_months_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let procedures = generate_procedures(&mut rng, today());

        assert!(procedures.len() >= 10 && procedures.len() <= 30);
        assert!(procedures.iter().all(|p| p.performed_at.year() == 2026));
        assert!(procedures.iter().all(|p| p.performed_at.month() <= 10));
        for month in 1..=10 {
            let n = procedures.iter().filter(|p| p.performed_at.month() == month).count();
            assert!((1..=3).contains(&n), "month {month} has {n} procedures");
        }
    }

    #[test]
    fn procedures_sorted_newest_first() {
        let mut rng = StdRng::seed_from_u64(11);
        let procedures = generate_procedures(&mut rng, today());
        assert!(procedures.windows(2).all(|w| w[0].performed_at >= w[1].performed_at));
    }

    #[test]
    fn routine_has_no_photos_others_do() {
        let mut rng = StdRng::seed_from_u64(5);
        for p in generate_procedures(&mut rng, today()) {
            if p.procedure_type == ProcedureType::Rotina {
                assert!(!p.has_photos());
            } else {
                assert!(p.before_image.is_some());
                assert!((1..=3).contains(&p.after_images.len()));
                for (j, img) in p.after_images.iter().enumerate() {
                    assert_eq!((img.taken_at - p.performed_at).num_days(), 15 * (j as i64 + 1));
                }
            }
        }
    }

    #[test]
    fn each_client_has_an_upcoming_appointment() {
        let now = today().and_hms_opt(12, 0, 0).unwrap();
        for client in clients(today(), 9) {
            assert!(client.appointments.iter().any(|a| a.is_upcoming(now)));
            assert!(client.appointments.windows(2).all(|w| w[0].scheduled_at <= w[1].scheduled_at));
        }
    }

    #[test]
    fn conversation_previews_match_last_message() {
        for client in clients(today(), 2) {
            for conv in &client.conversations {
                let last = conv.messages.last().unwrap();
                assert_eq!(conv.last_message, last.text);
                assert_eq!(conv.timestamp_label, last.timestamp_label);
            }
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn clinic_store_selects_first_client() {
        let store = clinic_store(today(), 4);
        assert_eq!(store.current_client().unwrap().profile.name, "Ana Silva");
        assert_eq!(store.catalog().len(), 4);
        assert_eq!(store.doctor().initials(), "DFN");
    }
}
