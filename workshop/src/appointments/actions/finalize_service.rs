//! FinalizeService command handler
//!
//! The "mark service completed" shortcut: every checklist step is set to done,
//! the log is locked and the appointment moves to Finalized in one step.
//! Irreversible; a second call fails with `InvalidState`.

use crate::appointments::service_log;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

/// FinalizeService action
#[derive(Debug, Clone)]
pub struct FinalizeServiceAction {
    pub appointment_id: String,
}

impl CommandHandler for FinalizeServiceAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        service_log::authorize_log_access(&metadata.actor, &case)?;

        let events = service_log::finalize(&mut case, &metadata.actor, ctx.now)?;
        Ok(ActionResult::updated(case, events))
    }
}
