//! OpenServiceLog command handler
//!
//! Opens the service log of an appointment, or returns the existing one as is.

use shared::appointment::EventPayload;

use crate::appointments::service_log;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

/// OpenServiceLog action
#[derive(Debug, Clone)]
pub struct OpenServiceLogAction {
    pub appointment_id: String,
}

impl CommandHandler for OpenServiceLogAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        service_log::authorize_log_access(&metadata.actor, &case)?;

        if !service_log::create_or_load(&mut case, ctx.catalog, ctx.now)? {
            return Ok(ActionResult::unchanged(case));
        }

        let log = case.log()?;
        let event = EventPayload::ServiceLogOpened {
            checklist: log.checklist.clone(),
            base_cost: log.base_cost,
        };
        Ok(ActionResult::updated(case, vec![event]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::actions::test_support::{Fixture, meta};
    use crate::appointments::traits::CaseChange;
    use crate::core::WorkshopError;
    use shared::appointment::AppointmentStatus;
    use shared::models::Actor;

    fn open() -> OpenServiceLogAction {
        OpenServiceLogAction {
            appointment_id: "a1".into(),
        }
    }

    #[test]
    fn test_first_open_creates_log() {
        let fx = Fixture::new();
        fx.seed("a1", "v1", AppointmentStatus::InProgress);
        let result = open()
            .execute(&fx.ctx(), &meta(Actor::technician("t1")))
            .unwrap();
        assert!(matches!(result.change, CaseChange::Updated(_)));
        assert_eq!(result.change.case().log().unwrap().checklist.len(), 2);
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_existing_log_is_returned_unchanged() {
        let fx = Fixture::new();
        fx.seed_with_log("a1", AppointmentStatus::Finalized);
        let result = open()
            .execute(&fx.ctx(), &meta(Actor::receptionist("r1")))
            .unwrap();
        assert!(matches!(result.change, CaseChange::Unchanged(_)));
        assert!(result.events.is_empty());
        assert!(result.change.case().log().unwrap().is_locked());
    }

    #[test]
    fn test_client_denied() {
        let fx = Fixture::new();
        fx.seed("a1", "v1", AppointmentStatus::InProgress);
        assert!(matches!(
            open().execute(&fx.ctx(), &meta(Actor::client("c1"))),
            Err(WorkshopError::PermissionDenied(_))
        ));
    }
}
