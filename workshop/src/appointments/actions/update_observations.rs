//! UpdateObservations command handler

use shared::appointment::EventPayload;

use crate::appointments::service_log;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;
use crate::utils::validation::{MAX_OBSERVATIONS_LEN, validate_text};

/// UpdateObservations action
#[derive(Debug, Clone)]
pub struct UpdateObservationsAction {
    pub appointment_id: String,
    pub observations: String,
}

impl CommandHandler for UpdateObservationsAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        validate_text(&self.observations, "observations", MAX_OBSERVATIONS_LEN)?;

        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        service_log::authorize_log_access(&metadata.actor, &case)?;
        service_log::update_observations(&mut case, &self.observations)?;

        Ok(ActionResult::updated(
            case,
            vec![EventPayload::ObservationsUpdated {
                observations: self.observations.clone(),
            }],
        ))
    }
}
