//! Reschedule command handler
//!
//! Moves an open appointment to another date/time. The new slot is checked
//! against the business hours current at the time of the request.

use chrono::{NaiveDate, NaiveTime};
use shared::appointment::{AppointmentStatus, EventPayload};
use shared::models::ActorRole;

use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::{WorkshopError, WorkshopResult};

/// Reschedule action
#[derive(Debug, Clone)]
pub struct RescheduleAction {
    pub appointment_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl CommandHandler for RescheduleAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let actor = &metadata.actor;
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;

        if case.appointment.is_terminal() {
            return Err(WorkshopError::invalid_state(format!(
                "appointment {} is {}",
                case.id(),
                case.status()
            )));
        }

        match actor.role {
            ActorRole::Receptionist | ActorRole::Administrator => {}
            ActorRole::Client if case.appointment.client_id != actor.id => {
                return Err(WorkshopError::permission_denied(
                    "clients can only reschedule their own appointments",
                ));
            }
            ActorRole::Client if case.status() != AppointmentStatus::Pending => {
                return Err(WorkshopError::invalid_state(
                    "clients can only reschedule pending appointments",
                ));
            }
            ActorRole::Client => {}
            ActorRole::Technician => {
                return Err(WorkshopError::permission_denied(
                    "technicians cannot reschedule appointments",
                ));
            }
        }

        ctx.validate_slot(self.date, self.time)?;

        case.appointment.date = self.date;
        case.appointment.time = self.time;
        case.appointment.updated_at = ctx.now;
        case.check_invariants()?;

        Ok(ActionResult::updated(
            case,
            vec![EventPayload::AppointmentRescheduled {
                date: self.date,
                time: self.time,
            }],
        ))
    }
}
