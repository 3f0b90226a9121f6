//! AssignTechnician command handler

use shared::appointment::EventPayload;

use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::{WorkshopError, WorkshopResult};
use crate::utils::validation::{MAX_ID_LEN, validate_required_text};

/// AssignTechnician action
#[derive(Debug, Clone)]
pub struct AssignTechnicianAction {
    pub appointment_id: String,
    pub technician_id: String,
}

impl CommandHandler for AssignTechnicianAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        if !metadata.actor.is_staff() {
            return Err(WorkshopError::permission_denied(
                "only receptionists and administrators assign technicians",
            ));
        }
        validate_required_text(&self.technician_id, "technician_id", MAX_ID_LEN)?;

        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        if case.appointment.is_terminal() {
            return Err(WorkshopError::invalid_state(format!(
                "appointment {} is {}",
                case.id(),
                case.status()
            )));
        }

        let previous = case
            .appointment
            .technician_id
            .replace(self.technician_id.clone());
        case.appointment.updated_at = ctx.now;
        case.check_invariants()?;

        Ok(ActionResult::updated(
            case,
            vec![EventPayload::TechnicianAssigned {
                technician_id: self.technician_id.clone(),
                previous,
            }],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::actions::test_support::{Fixture, meta};
    use shared::appointment::AppointmentStatus;
    use shared::models::Actor;

    fn assign(technician_id: &str) -> AssignTechnicianAction {
        AssignTechnicianAction {
            appointment_id: "a1".into(),
            technician_id: technician_id.into(),
        }
    }

    #[test]
    fn test_reassign_records_previous() {
        let fx = Fixture::new();
        fx.seed("a1", "v1", AppointmentStatus::Confirmed);
        let result = assign("t2")
            .execute(&fx.ctx(), &meta(Actor::administrator("admin")))
            .unwrap();
        assert!(result.change.case().appointment.is_assigned_to("t2"));
        assert_eq!(
            result.events,
            vec![EventPayload::TechnicianAssigned {
                technician_id: "t2".into(),
                previous: Some("t1".into()),
            }]
        );
    }

    #[test]
    fn test_rejections() {
        let fx = Fixture::new();
        fx.seed("a1", "v1", AppointmentStatus::Cancelled);
        assert!(matches!(
            assign("t2").execute(&fx.ctx(), &meta(Actor::technician("t2"))),
            Err(WorkshopError::PermissionDenied(_))
        ));
        assert!(matches!(
            assign("t2").execute(&fx.ctx(), &meta(Actor::receptionist("r1"))),
            Err(WorkshopError::InvalidState(_))
        ));
        assert!(matches!(
            assign(" ").execute(&fx.ctx(), &meta(Actor::receptionist("r1"))),
            Err(WorkshopError::Validation(_))
        ));
    }
}
