pub mod appointment;
pub mod client;
pub mod conversation;
pub mod enums;
pub mod procedure;
pub mod professional;
pub mod report;

pub use appointment::Appointment;
pub use client::{Client, Notification, Profile};
pub use conversation::{Conversation, Message};
pub use enums::{AppointmentStatus, ProcedureType, ReportStatus};
pub use procedure::{default_catalog, AfterImage, PhotoUpdate, ProcedureConfig, ProcedureRecord};
pub use professional::{Doctor, NotificationSettings};
pub use report::{Report, ReportKind};
