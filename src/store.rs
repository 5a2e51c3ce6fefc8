//! In-memory clinic state.
//!
//! `ClinicStore` owns every client record plus the procedure catalog and
//! the currently selected client. It is passed explicitly to whatever
//! needs it; there is no global "current client". Nothing is persisted:
//! the store is rebuilt from fixtures on every start.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::models::{
    Appointment, Client, Conversation, Doctor, Message, Notification, PhotoUpdate,
    ProcedureConfig, ProcedureRecord, ProcedureType, Profile, Report, ReportKind,
};

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    #[error("Procedure {procedure_id} not found for client {client_id}")]
    ProcedureNotFound { client_id: Uuid, procedure_id: Uuid },

    #[error("Conversation {conversation_id} not found for client {client_id}")]
    ConversationNotFound { client_id: Uuid, conversation_id: Uuid },

    #[error("No catalog entry for procedure type {0}")]
    CatalogEntryNotFound(ProcedureType),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Sign-up form data for a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub cpf: String,
}

/// An appointment flattened with the client it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledAppointment {
    pub client_id: Uuid,
    pub client_name: String,
    pub client_avatar: String,
    pub appointment: Appointment,
}

// ═══════════════════════════════════════════════════════════
// ClinicStore
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ClinicStore {
    doctor: Doctor,
    clients: Vec<Client>,
    current_client: Option<Uuid>,
    catalog: Vec<ProcedureConfig>,
}

impl ClinicStore {
    /// The first client starts selected.
    pub fn new(doctor: Doctor, clients: Vec<Client>, catalog: Vec<ProcedureConfig>) -> Self {
        let current_client = clients.first().map(|c| c.id);
        Self {
            doctor,
            clients,
            current_client,
            catalog,
        }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, client_id: Uuid) -> Result<&Client, StoreError> {
        self.clients
            .iter()
            .find(|c| c.id == client_id)
            .ok_or(StoreError::ClientNotFound(client_id))
    }

    fn client_mut(&mut self, client_id: Uuid) -> Result<&mut Client, StoreError> {
        self.clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or(StoreError::ClientNotFound(client_id))
    }

    // ── Current client ──────────────────────────────────────

    pub fn current_client(&self) -> Option<&Client> {
        let id = self.current_client?;
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn select_client(&mut self, client_id: Uuid) -> Result<&Client, StoreError> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == client_id)
            .ok_or(StoreError::ClientNotFound(client_id))?;
        self.current_client = Some(client_id);
        tracing::info!(client_id = %client_id, "Current client selected");
        Ok(&self.clients[index])
    }

    // ── Procedures ──────────────────────────────────────────

    /// Newest first, matching the procedure list order.
    pub fn add_procedure(&mut self, client_id: Uuid, record: ProcedureRecord) -> Result<(), StoreError> {
        let procedure_id = record.id;
        let procedure_type = record.procedure_type;
        self.client_mut(client_id)?.performed_procedures.insert(0, record);
        tracing::info!(
            client_id = %client_id,
            procedure_id = %procedure_id,
            procedure_type = procedure_type.as_str(),
            "Procedure recorded"
        );
        Ok(())
    }

    pub fn procedure(&self, client_id: Uuid, procedure_id: Uuid) -> Result<&ProcedureRecord, StoreError> {
        self.client(client_id)?
            .procedure(procedure_id)
            .ok_or(StoreError::ProcedureNotFound {
                client_id,
                procedure_id,
            })
    }

    pub fn update_procedure_photos(
        &mut self,
        client_id: Uuid,
        procedure_id: Uuid,
        update: PhotoUpdate,
    ) -> Result<&ProcedureRecord, StoreError> {
        let client = self.client_mut(client_id)?;
        let record = client
            .performed_procedures
            .iter_mut()
            .find(|p| p.id == procedure_id)
            .ok_or(StoreError::ProcedureNotFound {
                client_id,
                procedure_id,
            })?;

        record.apply_photos(update);
        tracing::info!(
            client_id = %client_id,
            procedure_id = %procedure_id,
            after_images = record.after_images.len(),
            has_before = record.before_image.is_some(),
            "Procedure photos updated"
        );
        Ok(&*record)
    }

    /// Every client's procedures, client by client.
    pub fn all_procedures(&self) -> impl Iterator<Item = &ProcedureRecord> {
        self.clients.iter().flat_map(|c| c.performed_procedures.iter())
    }

    // ── Catalog ─────────────────────────────────────────────

    pub fn catalog(&self) -> &[ProcedureConfig] {
        &self.catalog
    }

    pub fn catalog_entry(&self, procedure_type: ProcedureType) -> Result<&ProcedureConfig, StoreError> {
        self.catalog
            .iter()
            .find(|c| c.procedure_type == procedure_type)
            .ok_or(StoreError::CatalogEntryNotFound(procedure_type))
    }

    pub fn update_procedure_delay(
        &mut self,
        procedure_type: ProcedureType,
        delay_days: u32,
    ) -> Result<(), StoreError> {
        let entry = self
            .catalog
            .iter_mut()
            .find(|c| c.procedure_type == procedure_type)
            .ok_or(StoreError::CatalogEntryNotFound(procedure_type))?;
        entry.delay_days = delay_days;
        tracing::info!(
            procedure_type = procedure_type.as_str(),
            delay_days,
            "Follow-up delay updated"
        );
        Ok(())
    }

    // ── Reports & notifications ─────────────────────────────

    pub fn add_report(&mut self, client_id: Uuid, report: Report) -> Result<(), StoreError> {
        self.client_mut(client_id)?.reports.insert(0, report);
        tracing::info!(client_id = %client_id, "Report added");
        Ok(())
    }

    /// Reports matching a keyword and, optionally, a kind.
    pub fn search_reports(
        &self,
        client_id: Uuid,
        keyword: &str,
        kind: Option<ReportKind>,
    ) -> Result<Vec<&Report>, StoreError> {
        Ok(self
            .client(client_id)?
            .reports
            .iter()
            .filter(|r| r.matches(keyword))
            .filter(|r| kind.map_or(true, |k| r.kind() == k))
            .collect())
    }

    pub fn add_notification(&mut self, client_id: Uuid, notification: Notification) -> Result<(), StoreError> {
        self.client_mut(client_id)?.notifications.insert(0, notification);
        tracing::debug!(client_id = %client_id, "Notification added");
        Ok(())
    }

    /// Returns how many notifications were unread.
    pub fn mark_notifications_read(&mut self, client_id: Uuid) -> Result<usize, StoreError> {
        let client = self.client_mut(client_id)?;
        let mut marked = 0;
        for notification in client.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            marked += 1;
        }
        Ok(marked)
    }

    // ── Appointments ────────────────────────────────────────

    /// Keeps the client's appointments sorted by date.
    pub fn add_appointment(&mut self, client_id: Uuid, appointment: Appointment) -> Result<(), StoreError> {
        let scheduled_at = appointment.scheduled_at;
        let client = self.client_mut(client_id)?;
        client.appointments.push(appointment);
        client.appointments.sort_by_key(|a| a.scheduled_at);
        tracing::info!(client_id = %client_id, scheduled_at = %scheduled_at, "Appointment added");
        Ok(())
    }

    /// All clients' appointments, ascending by date.
    pub fn all_appointments(&self) -> Vec<ScheduledAppointment> {
        let mut all: Vec<ScheduledAppointment> = self
            .clients
            .iter()
            .flat_map(|client| {
                client.appointments.iter().map(move |appt| ScheduledAppointment {
                    client_id: client.id,
                    client_name: client.profile.name.clone(),
                    client_avatar: client.profile.avatar_url.clone(),
                    appointment: appt.clone(),
                })
            })
            .collect();
        all.sort_by_key(|s| s.appointment.scheduled_at);
        all
    }

    // ── Messaging ───────────────────────────────────────────

    pub fn add_message(
        &mut self,
        client_id: Uuid,
        conversation_id: Uuid,
        message: Message,
    ) -> Result<(), StoreError> {
        let client = self.client_mut(client_id)?;
        let reader = client.profile.name.clone();
        let conversation = find_conversation(client, conversation_id)?;
        conversation.push(message, &reader);
        tracing::debug!(
            client_id = %client_id,
            conversation_id = %conversation_id,
            "Message appended"
        );
        Ok(())
    }

    pub fn mark_conversation_read(&mut self, client_id: Uuid, conversation_id: Uuid) -> Result<(), StoreError> {
        let client = self.client_mut(client_id)?;
        find_conversation(client, conversation_id)?.mark_read();
        Ok(())
    }

    // ── Registration ────────────────────────────────────────

    /// Creates a client with empty history and a welcome conversation.
    pub fn register_client(&mut self, registration: Registration, now: NaiveDateTime) -> Uuid {
        let id = Uuid::new_v4();
        let timestamp = now.format("%H:%M").to_string();

        let welcome = Conversation {
            id: Uuid::new_v4(),
            contact_name: config::CLINIC_CONTACT.into(),
            contact_avatar: CLINIC_AVATAR.into(),
            last_message: "Bem-vindo(a) à clínica!".into(),
            timestamp_label: "Agora".into(),
            unread_count: 0,
            messages: vec![Message {
                read: true,
                ..Message::new(
                    config::CLINIC_CONTACT,
                    "Bem-vindo(a) à Clínica DermApp! Estamos felizes em tê-lo(a) conosco.",
                    timestamp,
                )
            }],
        };

        self.clients.push(Client {
            id,
            profile: Profile {
                name: registration.full_name,
                email: registration.email,
                phone: registration.phone,
                date_of_birth: registration.date_of_birth,
                cpf: registration.cpf,
                address: String::new(),
                avatar_url: format!("https://img.usecurling.com/ppl/medium?seed={id}"),
            },
            notifications: Vec::new(),
            appointments: Vec::new(),
            reports: Vec::new(),
            conversations: vec![welcome],
            performed_procedures: Vec::new(),
        });

        tracing::info!(client_id = %id, "Client registered");
        id
    }
}

pub const CLINIC_AVATAR: &str = "https://img.usecurling.com/i?q=clinic&color=azure&shape=outline";

fn find_conversation(client: &mut Client, conversation_id: Uuid) -> Result<&mut Conversation, StoreError> {
    let client_id = client.id;
    client
        .conversations
        .iter_mut()
        .find(|c| c.id == conversation_id)
        .ok_or(StoreError::ConversationNotFound {
            client_id,
            conversation_id,
        })
}
