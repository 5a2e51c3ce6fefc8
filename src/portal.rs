//! Portal composition root.
//!
//! `Portal` owns the configuration, the clinic store and the session.
//! The session's role is resolved into a `CapabilitySet` once, when the
//! role is chosen, and every gated operation checks that set. Client-role
//! sessions are confined to the currently selected client.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::calendar::{self, BookingRequest, CalendarError};
use crate::capabilities::{AccessDenied, Capability, CapabilitySet, Role};
use crate::comparison::ComparisonSelector;
use crate::config::PortalConfig;
use crate::dashboard::{self, DoctorDashboard, PatientDashboard};
use crate::fixtures;
use crate::follow_up::{self, FollowUpReminder};
use crate::models::{Appointment, Client, Message, ProcedureRecord, ProcedureType, Report, ReportKind};
use crate::photos::{PhotoDraft, PhotoKind, PhotoUploader, UploadError, UploadHandle};
use crate::store::{ClinicStore, Registration, StoreError};
use crate::timeline::{key_indicators_with_limit, KeyIndicators};

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Access(#[from] AccessDenied),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("No client selected")]
    NoClientSelected,
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub role: Role,
    pub capabilities: CapabilitySet,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            capabilities: CapabilitySet::for_role(role),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Portal
// ═══════════════════════════════════════════════════════════

pub struct Portal {
    config: PortalConfig,
    store: ClinicStore,
    session: Session,
    slots: Vec<NaiveTime>,
    blocked: Vec<NaiveDateTime>,
    uploader: PhotoUploader,
}

impl Portal {
    pub fn new(config: PortalConfig, store: ClinicStore, role: Role) -> Result<Self, PortalError> {
        let slots = calendar::parse_slots(&config.booking_slots)?;
        let uploader = PhotoUploader::new(config.upload_latency);
        tracing::info!(role = %role, clients = store.clients().len(), "Portal started");
        Ok(Self {
            config,
            store,
            session: Session::new(role),
            slots,
            blocked: Vec::new(),
            uploader,
        })
    }

    /// Portal over the mock clinic generated for `today`.
    pub fn with_fixtures(config: PortalConfig, role: Role, today: NaiveDate) -> Result<Self, PortalError> {
        let store = fixtures::clinic_store(today, config.fixture_seed);
        Self::new(config, store, role)
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn store(&self) -> &ClinicStore {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn role(&self) -> Role {
        self.session.role
    }

    pub fn switch_role(&mut self, role: Role) {
        let previous = self.session.role;
        self.session = Session::new(role);
        tracing::info!(from = %previous, to = %role, "Role switched");
    }

    fn require(&self, capability: Capability) -> Result<(), PortalError> {
        Ok(self.session.capabilities.require(capability)?)
    }

    /// Any client for clinic roles; only the selected client otherwise.
    fn scoped_client(&self, client_id: Uuid) -> Result<&Client, PortalError> {
        let caps = self.session.capabilities;
        if !caps.allows(Capability::ViewAllClients) {
            caps.require(Capability::ViewOwnRecords)?;
            if self.store.current_client().map(|c| c.id) != Some(client_id) {
                return Err(AccessDenied {
                    role: self.session.role,
                    capability: Capability::ViewAllClients,
                }
                .into());
            }
        }
        Ok(self.store.client(client_id)?)
    }

    // ── Clients ─────────────────────────────────────────────

    pub fn current_client(&self) -> Result<&Client, PortalError> {
        self.store.current_client().ok_or(PortalError::NoClientSelected)
    }

    pub fn select_client(&mut self, client_id: Uuid) -> Result<&Client, PortalError> {
        self.require(Capability::SwitchClient)?;
        Ok(self.store.select_client(client_id)?)
    }

    pub fn register_client(&mut self, registration: Registration, now: NaiveDateTime) -> Uuid {
        self.store.register_client(registration, now)
    }

    // ── Dashboards & indicators ─────────────────────────────

    pub fn doctor_dashboard(&self, now: NaiveDateTime) -> Result<DoctorDashboard, PortalError> {
        self.require(Capability::ViewAllClients)?;
        Ok(dashboard::doctor_dashboard(&self.store, now, self.config.top_types_per_month))
    }

    pub fn patient_dashboard(&self, now: NaiveDateTime) -> Result<PatientDashboard, PortalError> {
        let client = self.current_client()?;
        let client = self.scoped_client(client.id)?;
        Ok(dashboard::patient_dashboard(client, now, self.config.top_types_per_month))
    }

    pub fn key_indicators(&self, client_id: Uuid, today: NaiveDate) -> Result<KeyIndicators, PortalError> {
        self.require(Capability::ViewKeyIndicators)?;
        let client = self.scoped_client(client_id)?;
        Ok(key_indicators_with_limit(
            &client.performed_procedures,
            today,
            self.config.top_types_per_month,
        ))
    }

    pub fn search_reports(
        &self,
        client_id: Uuid,
        keyword: &str,
        kind: Option<ReportKind>,
    ) -> Result<Vec<&Report>, PortalError> {
        self.scoped_client(client_id)?;
        Ok(self.store.search_reports(client_id, keyword, kind)?)
    }

    // ── Procedures & photos ─────────────────────────────────

    pub fn comparison(&self, client_id: Uuid, procedure_id: Uuid) -> Result<ComparisonSelector, PortalError> {
        self.scoped_client(client_id)?;
        let record = self.store.procedure(client_id, procedure_id)?;
        let mut selector = ComparisonSelector::with_default_reveal(self.config.default_reveal_percent);
        selector.load_procedure(record);
        Ok(selector)
    }

    pub fn update_procedure_delay(&mut self, procedure_type: ProcedureType, delay_days: u32) -> Result<(), PortalError> {
        self.require(Capability::ConfigureProcedures)?;
        Ok(self.store.update_procedure_delay(procedure_type, delay_days)?)
    }

    pub fn photo_draft(&self, client_id: Uuid, procedure_id: Uuid) -> Result<PhotoDraft, PortalError> {
        self.require(Capability::ManagePhotos)?;
        Ok(PhotoDraft::from_record(self.store.procedure(client_id, procedure_id)?))
    }

    pub fn start_upload(&self, kind: PhotoKind, procedure_type: ProcedureType, seed: u32) -> Result<UploadHandle, PortalError> {
        self.require(Capability::ManagePhotos)?;
        Ok(self.uploader.start(kind, procedure_type, seed)?)
    }

    pub fn save_photos(
        &mut self,
        client_id: Uuid,
        procedure_id: Uuid,
        draft: PhotoDraft,
    ) -> Result<&ProcedureRecord, PortalError> {
        self.require(Capability::ManagePhotos)?;
        Ok(self.store.update_procedure_photos(client_id, procedure_id, draft.into_update())?)
    }

    pub fn pending_follow_ups(&self, client_id: Uuid, today: NaiveDate) -> Result<Vec<FollowUpReminder>, PortalError> {
        let client = self.scoped_client(client_id)?;
        Ok(follow_up::pending_follow_ups(
            &client.performed_procedures,
            self.store.catalog(),
            today,
        ))
    }

    // ── Schedule ────────────────────────────────────────────

    pub fn available_slots(&self, day: NaiveDate, today: NaiveDate) -> Vec<NaiveTime> {
        let appointments = self.store.all_appointments();
        calendar::available_slots(
            day,
            &self.slots,
            calendar::taken_slots(&appointments, &self.blocked),
            today,
        )
    }

    /// Client books for themselves.
    pub fn book_appointment(&mut self, request: &BookingRequest, today: NaiveDate) -> Result<Appointment, PortalError> {
        self.require(Capability::BookOwnAppointment)?;
        let client_id = self.current_client()?.id;
        self.insert_appointment(client_id, request, today)
    }

    /// Clinic books on a client's behalf.
    pub fn schedule_appointment(
        &mut self,
        client_id: Uuid,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<Appointment, PortalError> {
        self.require(Capability::ManageSchedule)?;
        self.insert_appointment(client_id, request, today)
    }

    fn insert_appointment(
        &mut self,
        client_id: Uuid,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<Appointment, PortalError> {
        let appointment = calendar::new_appointment(request, today)?;
        if !self.available_slots(request.date, today).contains(&request.time) {
            return Err(CalendarError::SlotUnavailable(appointment.scheduled_at).into());
        }
        self.store.add_appointment(client_id, appointment.clone())?;
        Ok(appointment)
    }

    pub fn block_time(&mut self, at: NaiveDateTime) -> Result<(), PortalError> {
        self.require(Capability::BlockTime)?;
        if !self.blocked.contains(&at) {
            self.blocked.push(at);
        }
        tracing::info!(at = %at, "Time blocked");
        Ok(())
    }

    pub fn blocked_times(&self) -> &[NaiveDateTime] {
        &self.blocked
    }

    // ── Messaging ───────────────────────────────────────────

    /// Sends as the client in a client session, as the doctor otherwise.
    /// Only messages from the clinic side count as unread for the client.
    pub fn send_message(
        &mut self,
        client_id: Uuid,
        conversation_id: Uuid,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<(), PortalError> {
        self.require(Capability::Messaging)?;
        let client = self.scoped_client(client_id)?;
        let sender = match self.session.role {
            Role::Client => client.profile.name.clone(),
            Role::Doctor | Role::Admin => self.store.doctor().name.clone(),
        };
        let message = Message::new(sender, text, now.format("%H:%M").to_string());
        Ok(self.store.add_message(client_id, conversation_id, message)?)
    }
}
