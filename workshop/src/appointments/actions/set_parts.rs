//! SetParts command handler
//!
//! Replaces the spare parts recorded in a service log and stores the new total.

use shared::appointment::{EventPayload, PartUsageInput};

use crate::appointments::service_log;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

/// SetParts action
#[derive(Debug, Clone)]
pub struct SetPartsAction {
    pub appointment_id: String,
    pub parts: Vec<PartUsageInput>,
}

impl CommandHandler for SetPartsAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        service_log::authorize_log_access(&metadata.actor, &case)?;

        service_log::set_parts(&mut case, &self.parts, ctx.catalog)?;

        let log = case.log()?;
        let event = EventPayload::PartsUpdated {
            parts: log.parts_used.clone(),
            final_cost: log.final_cost,
        };
        Ok(ActionResult::updated(case, vec![event]))
    }
}
