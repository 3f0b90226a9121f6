//! ServiceCase - one appointment together with its service log
//!
//! The appointment status machine and the service log lock are coupled: an
//! appointment is Finalized exactly when its log exists and is locked. Every
//! mutation goes through a `ServiceCase` and ends with [`ServiceCase::check_invariants`],
//! so the two halves cannot drift apart.

use serde::{Deserialize, Serialize};
use shared::appointment::{Appointment, AppointmentStatus, ChecklistProgress, ServiceLog};

use crate::core::{WorkshopError, WorkshopResult};
use crate::money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCase {
    pub appointment: Appointment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_log: Option<ServiceLog>,
    /// Store version, bumped on every committed change (0 = never stored)
    #[serde(default)]
    pub version: u64,
}

impl ServiceCase {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            appointment,
            service_log: None,
            version: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.appointment.id
    }

    pub fn status(&self) -> AppointmentStatus {
        self.appointment.status
    }

    /// The service log, or `ServiceLogNotFound`
    pub fn log(&self) -> WorkshopResult<&ServiceLog> {
        self.service_log
            .as_ref()
            .ok_or_else(|| WorkshopError::ServiceLogNotFound(self.appointment.id.clone()))
    }

    pub fn log_mut(&mut self) -> WorkshopResult<&mut ServiceLog> {
        let id = &self.appointment.id;
        self.service_log
            .as_mut()
            .ok_or_else(|| WorkshopError::ServiceLogNotFound(id.clone()))
    }

    /// Informational checklist completion, if a log exists
    pub fn progress(&self) -> Option<ChecklistProgress> {
        self.service_log.as_ref().map(|log| ChecklistProgress {
            done: log.checklist.done_count(),
            total: log.checklist.len(),
        })
    }

    /// Verify the coupling between appointment and service log
    ///
    /// A failure here means a handler produced an impossible state; it is
    /// reported as an internal error and the change is not committed.
    pub fn check_invariants(&self) -> WorkshopResult<()> {
        let finalized = self.appointment.status == AppointmentStatus::Finalized;

        match &self.service_log {
            Some(log) => {
                if log.appointment_id != self.appointment.id {
                    return Err(WorkshopError::Internal(format!(
                        "service log belongs to {} but is attached to {}",
                        log.appointment_id, self.appointment.id
                    )));
                }
                if finalized != log.is_locked() {
                    return Err(WorkshopError::Internal(format!(
                        "appointment {} is {} but its log is {}",
                        self.appointment.id,
                        self.appointment.status,
                        if log.is_locked() { "locked" } else { "open" }
                    )));
                }
                if let Some(part) = log.parts_used.iter().find(|p| p.quantity == 0) {
                    return Err(WorkshopError::Internal(format!(
                        "part {} recorded with zero quantity",
                        part.part_id
                    )));
                }
                if !money::verify_total(log.base_cost, &log.parts_used, log.final_cost) {
                    return Err(WorkshopError::Internal(format!(
                        "stored total {} of appointment {} does not match its parts",
                        log.final_cost, self.appointment.id
                    )));
                }
            }
            None if finalized => {
                return Err(WorkshopError::Internal(format!(
                    "appointment {} is finalized without a service log",
                    self.appointment.id
                )));
            }
            None => {}
        }
        Ok(())
    }
}
