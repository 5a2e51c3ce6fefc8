//! Role-based capabilities.
//!
//! A session's role is resolved into a `CapabilitySet` once, when the role
//! is chosen. Gated operations then ask the set, never the role:
//! 1. Doctor → clinic management (all clients, schedule, catalog, photos)
//! 2. Client → own records, own bookings
//! 3. Admin → everything
//!
//! Default-deny: a capability not in the set is refused.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Who is using the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Doctor,
    Client,
    Admin,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "doctor" => Some(Self::Doctor),
            "client" => Some(Self::Client),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One permitted portal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewAllClients,
    SwitchClient,
    ManageSchedule,
    BlockTime,
    ConfigureProcedures,
    ManagePhotos,
    ViewKeyIndicators,
    BookOwnAppointment,
    ViewOwnRecords,
    Messaging,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Self::ViewAllClients,
        Self::SwitchClient,
        Self::ManageSchedule,
        Self::BlockTime,
        Self::ConfigureProcedures,
        Self::ManagePhotos,
        Self::ViewKeyIndicators,
        Self::BookOwnAppointment,
        Self::ViewOwnRecords,
        Self::Messaging,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewAllClients => "view_all_clients",
            Self::SwitchClient => "switch_client",
            Self::ManageSchedule => "manage_schedule",
            Self::BlockTime => "block_time",
            Self::ConfigureProcedures => "configure_procedures",
            Self::ManagePhotos => "manage_photos",
            Self::ViewKeyIndicators => "view_key_indicators",
            Self::BookOwnAppointment => "book_own_appointment",
            Self::ViewOwnRecords => "view_own_records",
            Self::Messaging => "messaging",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const DOCTOR_CAPABILITIES: &[Capability] = &[
    Capability::ViewAllClients,
    Capability::SwitchClient,
    Capability::ManageSchedule,
    Capability::BlockTime,
    Capability::ConfigureProcedures,
    Capability::ManagePhotos,
    Capability::ViewKeyIndicators,
    Capability::Messaging,
];

const CLIENT_CAPABILITIES: &[Capability] = &[
    Capability::BookOwnAppointment,
    Capability::ViewOwnRecords,
    Capability::ViewKeyIndicators,
    Capability::Messaging,
];

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Role '{role}' may not {capability}")]
pub struct AccessDenied {
    pub role: Role,
    pub capability: Capability,
}

// ═══════════════════════════════════════════════════════════
// Capability set
// ═══════════════════════════════════════════════════════════

/// The capabilities of one role, resolved once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    role: Role,
    bits: u16,
}

impl CapabilitySet {
    pub fn for_role(role: Role) -> Self {
        let granted: &[Capability] = match role {
            Role::Doctor => DOCTOR_CAPABILITIES,
            Role::Client => CLIENT_CAPABILITIES,
            Role::Admin => &Capability::ALL,
        };
        let bits = granted.iter().fold(0, |acc, cap| acc | cap.bit());
        tracing::debug!(role = %role, capabilities = granted.len(), "Capabilities resolved");
        Self { role, bits }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.bits & capability.bit() != 0
    }

    pub fn require(&self, capability: Capability) -> Result<(), AccessDenied> {
        if self.allows(capability) {
            Ok(())
        } else {
            tracing::warn!(role = %self.role, capability = %capability, "Access denied");
            Err(AccessDenied {
                role: self.role,
                capability,
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|cap| self.allows(*cap))
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
