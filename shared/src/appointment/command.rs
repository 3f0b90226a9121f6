//! Appointment commands - requests to change an appointment or its service log

use super::snapshot::AppointmentStatus;
use crate::models::Actor;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Requested part line, before it is priced against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUsageInput {
    pub part_id: String,
    pub quantity: u32,
}

/// Command envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCommand {
    /// Idempotency key
    #[serde(default = "crate::util::new_id")]
    pub command_id: String,
    /// Who issues the command
    pub actor: Actor,
    /// Client timestamp (Unix milliseconds)
    #[serde(default = "crate::util::now_millis")]
    pub timestamp: i64,
    /// Version the caller last read; a mismatch is reported as stale state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
    pub payload: AppointmentCommandPayload,
}

impl AppointmentCommand {
    pub fn new(actor: Actor, payload: AppointmentCommandPayload) -> Self {
        Self {
            command_id: crate::util::new_id(),
            actor,
            timestamp: crate::util::now_millis(),
            expected_version: None,
            payload,
        }
    }

    /// Attach the version the caller based this command on
    pub fn expecting_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Command payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentCommandPayload {
    CreateAppointment {
        /// Caller-assigned ID; generated when absent
        #[serde(default)]
        appointment_id: Option<String>,
        client_id: String,
        vehicle_id: String,
        service_id: String,
        #[serde(default)]
        technician_id: Option<String>,
        date: NaiveDate,
        #[serde(with = "crate::util::hhmm")]
        time: NaiveTime,
        #[serde(default)]
        notes: Option<String>,
    },
    ChangeStatus {
        appointment_id: String,
        status: AppointmentStatus,
    },
    AssignTechnician {
        appointment_id: String,
        technician_id: String,
    },
    Reschedule {
        appointment_id: String,
        date: NaiveDate,
        #[serde(with = "crate::util::hhmm")]
        time: NaiveTime,
    },
    UpdateNotes {
        appointment_id: String,
        notes: String,
    },
    DeleteAppointment {
        appointment_id: String,
    },
    OpenServiceLog {
        appointment_id: String,
    },
    ToggleChecklistStep {
        appointment_id: String,
        step: String,
    },
    SetParts {
        appointment_id: String,
        parts: Vec<PartUsageInput>,
    },
    UpdateObservations {
        appointment_id: String,
        observations: String,
    },
    /// "Mark service completed": completes every step and locks the log
    FinalizeService {
        appointment_id: String,
    },
}

impl AppointmentCommandPayload {
    /// Target appointment; for creation only when the caller chose the ID
    pub fn appointment_id(&self) -> Option<&str> {
        match self {
            Self::CreateAppointment { appointment_id, .. } => appointment_id.as_deref(),
            Self::ChangeStatus { appointment_id, .. }
            | Self::AssignTechnician { appointment_id, .. }
            | Self::Reschedule { appointment_id, .. }
            | Self::UpdateNotes { appointment_id, .. }
            | Self::DeleteAppointment { appointment_id }
            | Self::OpenServiceLog { appointment_id }
            | Self::ToggleChecklistStep { appointment_id, .. }
            | Self::SetParts { appointment_id, .. }
            | Self::UpdateObservations { appointment_id, .. }
            | Self::FinalizeService { appointment_id } => Some(appointment_id),
        }
    }
}
