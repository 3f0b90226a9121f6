//! Appointment events - immutable facts recorded after command processing

use super::service_log::{ChecklistSnapshot, PartUsage};
use super::snapshot::AppointmentStatus;
use crate::models::{Actor, ActorRole};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Appointment event - audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number (ordering and replay)
    pub sequence: u64,
    /// Appointment this event belongs to
    pub appointment_id: String,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Operator who triggered this event
    pub operator_id: String,
    /// Operator name (snapshot for audit)
    pub operator_name: String,
    pub operator_role: ActorRole,
    /// Command that triggered this event
    pub command_id: String,
    pub event_type: AppointmentEventType,
    pub payload: EventPayload,
}

impl AppointmentEvent {
    /// Build an event for `actor`; the store assigns `sequence` on commit
    pub fn new(
        appointment_id: impl Into<String>,
        actor: &Actor,
        command_id: impl Into<String>,
        timestamp: i64,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: crate::util::new_id(),
            sequence: 0,
            appointment_id: appointment_id.into(),
            timestamp,
            operator_id: actor.id.clone(),
            operator_name: actor.name.clone(),
            operator_role: actor.role,
            command_id: command_id.into(),
            event_type: payload.event_type(),
            payload,
        }
    }
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentEventType {
    // Lifecycle
    AppointmentCreated,
    StatusChanged,
    AppointmentDeleted,

    // Scheduling
    TechnicianAssigned,
    AppointmentRescheduled,
    NotesUpdated,

    // Service log
    ServiceLogOpened,
    ChecklistStepToggled,
    PartsUpdated,
    ObservationsUpdated,
    ServiceFinalized,
}

impl std::fmt::Display for AppointmentEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AppointmentEventType::AppointmentCreated => "APPOINTMENT_CREATED",
            AppointmentEventType::StatusChanged => "STATUS_CHANGED",
            AppointmentEventType::AppointmentDeleted => "APPOINTMENT_DELETED",
            AppointmentEventType::TechnicianAssigned => "TECHNICIAN_ASSIGNED",
            AppointmentEventType::AppointmentRescheduled => "APPOINTMENT_RESCHEDULED",
            AppointmentEventType::NotesUpdated => "NOTES_UPDATED",
            AppointmentEventType::ServiceLogOpened => "SERVICE_LOG_OPENED",
            AppointmentEventType::ChecklistStepToggled => "CHECKLIST_STEP_TOGGLED",
            AppointmentEventType::PartsUpdated => "PARTS_UPDATED",
            AppointmentEventType::ObservationsUpdated => "OBSERVATIONS_UPDATED",
            AppointmentEventType::ServiceFinalized => "SERVICE_FINALIZED",
        };
        f.write_str(name)
    }
}

/// Event payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    AppointmentCreated {
        client_id: String,
        vehicle_id: String,
        service_id: String,
        date: NaiveDate,
        #[serde(with = "crate::util::hhmm")]
        time: NaiveTime,
    },
    StatusChanged {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    AppointmentDeleted {
        status: AppointmentStatus,
    },
    TechnicianAssigned {
        technician_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
    },
    AppointmentRescheduled {
        date: NaiveDate,
        #[serde(with = "crate::util::hhmm")]
        time: NaiveTime,
    },
    NotesUpdated {
        notes: String,
    },
    ServiceLogOpened {
        checklist: ChecklistSnapshot,
        base_cost: Decimal,
    },
    ChecklistStepToggled {
        step: String,
        done: bool,
    },
    PartsUpdated {
        parts: Vec<PartUsage>,
        final_cost: Decimal,
    },
    ObservationsUpdated {
        observations: String,
    },
    ServiceFinalized {
        final_cost: Decimal,
        completed_at: i64,
        /// true when the "mark completed" shortcut ticked every step
        checklist_forced: bool,
    },
}

impl EventPayload {
    pub fn event_type(&self) -> AppointmentEventType {
        match self {
            EventPayload::AppointmentCreated { .. } => AppointmentEventType::AppointmentCreated,
            EventPayload::StatusChanged { .. } => AppointmentEventType::StatusChanged,
            EventPayload::AppointmentDeleted { .. } => AppointmentEventType::AppointmentDeleted,
            EventPayload::TechnicianAssigned { .. } => AppointmentEventType::TechnicianAssigned,
            EventPayload::AppointmentRescheduled { .. } => {
                AppointmentEventType::AppointmentRescheduled
            }
            EventPayload::NotesUpdated { .. } => AppointmentEventType::NotesUpdated,
            EventPayload::ServiceLogOpened { .. } => AppointmentEventType::ServiceLogOpened,
            EventPayload::ChecklistStepToggled { .. } => AppointmentEventType::ChecklistStepToggled,
            EventPayload::PartsUpdated { .. } => AppointmentEventType::PartsUpdated,
            EventPayload::ObservationsUpdated { .. } => AppointmentEventType::ObservationsUpdated,
            EventPayload::ServiceFinalized { .. } => AppointmentEventType::ServiceFinalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_derives_type_from_payload() {
        let actor = Actor::technician("t1");
        let event = AppointmentEvent::new(
            "a1",
            &actor,
            "cmd-1",
            1_000,
            EventPayload::ChecklistStepToggled {
                step: "oil".into(),
                done: true,
            },
        );
        assert_eq!(event.event_type, AppointmentEventType::ChecklistStepToggled);
        assert_eq!(event.sequence, 0);
        assert_eq!(event.operator_role, ActorRole::Technician);
    }

    #[test]
    fn test_payload_serialization() {
        let payload = EventPayload::AppointmentRescheduled {
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "APPOINTMENT_RESCHEDULED");
        assert_eq!(json["date"], "2026-10-20");
        assert_eq!(json["time"], "10:30");
    }
}
