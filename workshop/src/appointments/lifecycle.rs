//! Appointment status machine
//!
//! Transitions are a function of (role, from) → allowed targets. The table
//! lives in [`allowed_targets`]; ownership rules (a client acts only on their
//! own appointments, a technician only on appointments assigned to them) are
//! checked separately in [`authorize_transition`].
//!
//! | From | Client | Receptionist / Administrator | Technician |
//! |------|--------|------------------------------|------------|
//! | Pending | Cancelled | Confirmed, InProgress, Finalized, Cancelled | InProgress |
//! | Confirmed | - | Pending, InProgress, Finalized, Cancelled | InProgress |
//! | InProgress | - | Finalized, Cancelled | Finalized |
//! | Finalized | - | - | - |
//! | Cancelled | - | - | - |

use shared::appointment::{Appointment, AppointmentStatus, EventPayload};
use shared::models::{Actor, ActorRole};

use super::aggregate::ServiceCase;
use super::service_log;
use crate::core::{WorkshopError, WorkshopResult};

use AppointmentStatus::*;

/// Target statuses `role` may move an appointment to from `from`
pub fn allowed_targets(role: ActorRole, from: AppointmentStatus) -> &'static [AppointmentStatus] {
    match (role, from) {
        (_, Finalized | Cancelled) => &[],

        (ActorRole::Receptionist | ActorRole::Administrator, Pending) => {
            &[Confirmed, InProgress, Finalized, Cancelled]
        }
        (ActorRole::Receptionist | ActorRole::Administrator, Confirmed) => {
            &[Pending, InProgress, Finalized, Cancelled]
        }
        (ActorRole::Receptionist | ActorRole::Administrator, InProgress) => {
            &[Finalized, Cancelled]
        }

        (ActorRole::Technician, Pending | Confirmed) => &[InProgress],
        (ActorRole::Technician, InProgress) => &[Finalized],

        (ActorRole::Client, Pending) => &[Cancelled],
        (ActorRole::Client, Confirmed | InProgress) => &[],
    }
}

pub fn can_transition(role: ActorRole, from: AppointmentStatus, to: AppointmentStatus) -> bool {
    allowed_targets(role, from).contains(&to)
}

/// Check that `actor` may move `appointment` to `to`
///
/// The transition table is consulted first, so a client asking to cancel a
/// Confirmed appointment gets `InvalidTransition` whoever owns it.
pub fn authorize_transition(
    actor: &Actor,
    appointment: &Appointment,
    to: AppointmentStatus,
) -> WorkshopResult<()> {
    if !can_transition(actor.role, appointment.status, to) {
        return Err(WorkshopError::InvalidTransition {
            from: appointment.status,
            to,
            role: actor.role,
        });
    }

    match actor.role {
        ActorRole::Client if appointment.client_id != actor.id => {
            Err(WorkshopError::permission_denied(format!(
                "client {} does not own appointment {}",
                actor.id, appointment.id
            )))
        }
        ActorRole::Technician if !appointment.is_assigned_to(&actor.id) => {
            Err(WorkshopError::permission_denied(format!(
                "technician {} is not assigned to appointment {}",
                actor.id, appointment.id
            )))
        }
        _ => Ok(()),
    }
}

/// Move the case to `to`, returning the events to record
///
/// Finalizing through a plain status change requires an open service log,
/// which is locked as it stands: steps are not force-completed here.
pub fn transition(
    case: &mut ServiceCase,
    actor: &Actor,
    to: AppointmentStatus,
    now: i64,
) -> WorkshopResult<Vec<EventPayload>> {
    authorize_transition(actor, &case.appointment, to)?;

    let from = case.appointment.status;
    let mut events = Vec::with_capacity(2);

    if to == Finalized {
        let log = case.log_mut()?;
        let completed_at = service_log::lock(log, now)?;
        events.push(EventPayload::ServiceFinalized {
            final_cost: log.final_cost,
            completed_at,
            checklist_forced: false,
        });
    }

    case.appointment.status = to;
    case.appointment.updated_at = now;
    events.insert(0, EventPayload::StatusChanged { from, to });

    case.check_invariants()?;
    Ok(events)
}
