//! ChangeStatus command handler
//!
//! Moves an appointment along the status table. Finalizing this way locks the
//! service log as it stands; see `FinalizeService` for the shortcut that also
//! completes the checklist.

use shared::appointment::AppointmentStatus;

use crate::appointments::lifecycle;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

/// ChangeStatus action
#[derive(Debug, Clone)]
pub struct ChangeStatusAction {
    pub appointment_id: String,
    pub status: AppointmentStatus,
}

impl CommandHandler for ChangeStatusAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        let events = lifecycle::transition(&mut case, &metadata.actor, self.status, ctx.now)?;
        Ok(ActionResult::updated(case, events))
    }
}
