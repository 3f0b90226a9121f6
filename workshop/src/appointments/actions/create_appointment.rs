//! CreateAppointment command handler
//!
//! Books a new appointment in Pending. Clients book for themselves; staff book
//! for anyone and may assign a technician up front.

use chrono::{NaiveDate, NaiveTime};
use shared::appointment::{Appointment, AppointmentStatus, EventPayload};
use shared::models::ActorRole;

use crate::appointments::ServiceCase;
use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::{WorkshopError, WorkshopResult};
use crate::scheduling;
use crate::utils::validation::{
    MAX_ID_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// CreateAppointment action
#[derive(Debug, Clone)]
pub struct CreateAppointmentAction {
    pub appointment_id: Option<String>,
    pub client_id: String,
    pub vehicle_id: String,
    pub service_id: String,
    pub technician_id: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl CreateAppointmentAction {
    fn authorize(&self, metadata: &CommandMetadata) -> WorkshopResult<()> {
        let actor = &metadata.actor;
        match actor.role {
            ActorRole::Receptionist | ActorRole::Administrator => Ok(()),
            ActorRole::Client if actor.id != self.client_id => Err(
                WorkshopError::permission_denied("clients can only book for themselves"),
            ),
            ActorRole::Client if self.technician_id.is_some() => Err(
                WorkshopError::permission_denied("clients cannot assign a technician"),
            ),
            ActorRole::Client => Ok(()),
            ActorRole::Technician => Err(WorkshopError::permission_denied(
                "technicians cannot book appointments",
            )),
        }
    }
}

impl CommandHandler for CreateAppointmentAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        // 1. Who may book
        self.authorize(metadata)?;

        // 2. Input shape
        validate_required_text(&self.client_id, "client_id", MAX_ID_LEN)?;
        validate_required_text(&self.vehicle_id, "vehicle_id", MAX_ID_LEN)?;
        validate_required_text(&self.service_id, "service_id", MAX_ID_LEN)?;
        validate_optional_text(&self.appointment_id, "appointment_id", MAX_ID_LEN)?;
        validate_optional_text(&self.technician_id, "technician_id", MAX_ID_LEN)?;
        validate_optional_text(&self.notes, "notes", MAX_NOTE_LEN)?;

        if ctx.catalog.service(&self.service_id).is_none() {
            return Err(WorkshopError::ServiceNotFound(self.service_id.clone()));
        }

        // 3. Slot against the current business hours
        ctx.validate_slot(self.date, self.time)?;

        // 4. One active appointment per vehicle (re-checked on commit)
        scheduling::can_create(
            &self.vehicle_id,
            &ctx.store.appointments_for_vehicle(&self.vehicle_id),
        )?;

        let id = match &self.appointment_id {
            Some(id) if ctx.store.load(id).is_some() => {
                return Err(WorkshopError::validation(format!(
                    "Appointment {} already exists",
                    id
                )));
            }
            Some(id) => id.clone(),
            None => shared::util::new_id(),
        };

        let appointment = Appointment {
            id,
            client_id: self.client_id.clone(),
            vehicle_id: self.vehicle_id.clone(),
            service_id: self.service_id.clone(),
            technician_id: self.technician_id.clone().filter(|t| !t.trim().is_empty()),
            date: self.date,
            time: self.time,
            status: AppointmentStatus::Pending,
            notes: self.notes.clone().unwrap_or_default(),
            created_at: ctx.now,
            updated_at: ctx.now,
        };

        let mut events = vec![EventPayload::AppointmentCreated {
            client_id: appointment.client_id.clone(),
            vehicle_id: appointment.vehicle_id.clone(),
            service_id: appointment.service_id.clone(),
            date: appointment.date,
            time: appointment.time,
        }];
        if let Some(technician_id) = &appointment.technician_id {
            events.push(EventPayload::TechnicianAssigned {
                technician_id: technician_id.clone(),
                previous: None,
            });
        }

        let case = ServiceCase::new(appointment);
        case.check_invariants()?;
        Ok(ActionResult::created(case, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::actions::test_support::{Fixture, at, meta, monday, sunday};
    use crate::appointments::traits::CaseChange;
    use shared::models::Actor;

    fn action(vehicle_id: &str, date: NaiveDate, time: NaiveTime) -> CreateAppointmentAction {
        CreateAppointmentAction {
            appointment_id: None,
            client_id: "c1".into(),
            vehicle_id: vehicle_id.into(),
            service_id: "s1".into(),
            technician_id: None,
            date,
            time,
            notes: Some("Rattle on the left".into()),
        }
    }

    #[test]
    fn test_client_books_pending_appointment() {
        let fx = Fixture::new();
        let result = action("v1", monday(), at(8, 0))
            .execute(&fx.ctx(), &meta(Actor::client("c1")))
            .unwrap();

        let CaseChange::Created(case) = &result.change else {
            panic!("expected a created case");
        };
        assert_eq!(case.status(), AppointmentStatus::Pending);
        assert_eq!(case.appointment.notes, "Rattle on the left");
        assert!(case.service_log.is_none());
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_slot_rules() {
        let fx = Fixture::new();
        let receptionist = meta(Actor::receptionist("r1"));
        assert!(matches!(
            action("v1", sunday(), at(8, 0)).execute(&fx.ctx(), &receptionist),
            Err(WorkshopError::NonWorkingDay { .. })
        ));
        assert!(matches!(
            action("v1", monday(), at(8, 15)).execute(&fx.ctx(), &receptionist),
            Err(WorkshopError::OutsideBusinessHours { .. })
        ));
        assert!(matches!(
            action("v1", monday(), at(17, 0)).execute(&fx.ctx(), &receptionist),
            Err(WorkshopError::OutsideBusinessHours { .. })
        ));
    }

    #[test]
    fn test_vehicle_with_active_appointment_is_rejected() {
        let fx = Fixture::new();
        fx.seed("a1", "v1", AppointmentStatus::Confirmed);
        assert!(matches!(
            action("v1", monday(), at(10, 0)).execute(&fx.ctx(), &meta(Actor::client("c1"))),
            Err(WorkshopError::ActiveAppointmentConflict { .. })
        ));
    }

    #[test]
    fn test_staff_assigns_technician_on_creation() {
        let fx = Fixture::new();
        let mut create = action("v1", monday(), at(10, 0));
        create.technician_id = Some("t1".into());
        create.appointment_id = Some("a-fixed".into());

        let result = create
            .execute(&fx.ctx(), &meta(Actor::receptionist("r1")))
            .unwrap();
        assert_eq!(result.change.case().id(), "a-fixed");
        assert!(result.change.case().appointment.is_assigned_to("t1"));
        assert_eq!(result.events.len(), 2);
    }

    #[test]
    fn test_permissions_and_validation() {
        let fx = Fixture::new();
        let create = action("v1", monday(), at(10, 0));
        assert!(matches!(
            create.execute(&fx.ctx(), &meta(Actor::client("someone-else"))),
            Err(WorkshopError::PermissionDenied(_))
        ));
        assert!(matches!(
            create.execute(&fx.ctx(), &meta(Actor::technician("t1"))),
            Err(WorkshopError::PermissionDenied(_))
        ));

        let mut unknown_service = create.clone();
        unknown_service.service_id = "nope".into();
        assert!(matches!(
            unknown_service.execute(&fx.ctx(), &meta(Actor::client("c1"))),
            Err(WorkshopError::ServiceNotFound(_))
        ));

        let mut long_notes = create.clone();
        long_notes.notes = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(matches!(
            long_notes.execute(&fx.ctx(), &meta(Actor::client("c1"))),
            Err(WorkshopError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_appointment_id() {
        let fx = Fixture::new();
        fx.seed("a1", "v9", AppointmentStatus::Cancelled);
        let mut create = action("v1", monday(), at(10, 0));
        create.appointment_id = Some("a1".into());
        assert!(matches!(
            create.execute(&fx.ctx(), &meta(Actor::receptionist("r1"))),
            Err(WorkshopError::Validation(_))
        ));
    }
}
