//! Appointment Module
//!
//! Types for the appointment / service-fulfillment core:
//! - Snapshot: the appointment record and its status
//! - Service log: checklist snapshot, parts usage, stored cost
//! - Commands: requests from clients and staff
//! - Events: immutable facts recorded after command processing

pub mod command;
pub mod event;
pub mod service_log;
pub mod snapshot;
pub mod types;

// Re-exports
pub use command::{AppointmentCommand, AppointmentCommandPayload, PartUsageInput};
pub use event::{AppointmentEvent, AppointmentEventType, EventPayload};
pub use service_log::{ChecklistItem, ChecklistSnapshot, PartUsage, ServiceLog};
pub use snapshot::{Appointment, AppointmentStatus};
pub use types::*;
