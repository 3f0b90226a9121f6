//! DeleteAppointment command handler
//!
//! Administrator-only hard delete. Finalized and cancelled appointments are
//! history and are never deleted.

use shared::appointment::EventPayload;
use shared::models::ActorRole;

use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::{WorkshopError, WorkshopResult};

/// DeleteAppointment action
#[derive(Debug, Clone)]
pub struct DeleteAppointmentAction {
    pub appointment_id: String,
}

impl CommandHandler for DeleteAppointmentAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        if metadata.actor.role != ActorRole::Administrator {
            return Err(WorkshopError::permission_denied(
                "only administrators delete appointments",
            ));
        }

        let case = ctx.load_case(&self.appointment_id, metadata)?;
        if case.appointment.is_terminal() {
            return Err(WorkshopError::invalid_state(format!(
                "appointment {} is {} and cannot be deleted",
                case.id(),
                case.status()
            )));
        }

        let status = case.status();
        Ok(ActionResult::deleted(
            case,
            EventPayload::AppointmentDeleted { status },
        ))
    }
}
