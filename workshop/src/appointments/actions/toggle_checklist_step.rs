//! ToggleChecklistStep command handler

use shared::appointment::EventPayload;

use crate::appointments::service_log;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

/// ToggleChecklistStep action
#[derive(Debug, Clone)]
pub struct ToggleChecklistStepAction {
    pub appointment_id: String,
    pub step: String,
}

impl CommandHandler for ToggleChecklistStepAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        service_log::authorize_log_access(&metadata.actor, &case)?;

        let done = service_log::toggle_step(&mut case, &self.step)?;
        Ok(ActionResult::updated(
            case,
            vec![EventPayload::ChecklistStepToggled {
                step: self.step.clone(),
                done,
            }],
        ))
    }
}
