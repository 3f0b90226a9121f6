//! UpdateNotes command handler
//!
//! Replaces the appointment notes (not append). Empty string clears them.

use shared::appointment::EventPayload;
use shared::models::ActorRole;

use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::{WorkshopError, WorkshopResult};
use crate::utils::validation::{MAX_NOTE_LEN, validate_text};

/// UpdateNotes action
#[derive(Debug, Clone)]
pub struct UpdateNotesAction {
    pub appointment_id: String,
    pub notes: String,
}

impl CommandHandler for UpdateNotesAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        validate_text(&self.notes, "notes", MAX_NOTE_LEN)?;

        let mut case = ctx.load_case(&self.appointment_id, metadata)?;
        let actor = &metadata.actor;
        let allowed = match actor.role {
            ActorRole::Receptionist | ActorRole::Administrator => true,
            ActorRole::Client => case.appointment.client_id == actor.id,
            ActorRole::Technician => false,
        };
        if !allowed {
            return Err(WorkshopError::permission_denied(format!(
                "{} {} cannot edit notes of appointment {}",
                actor.role,
                actor.id,
                case.id()
            )));
        }
        if case.appointment.is_terminal() {
            return Err(WorkshopError::invalid_state(format!(
                "appointment {} is {}",
                case.id(),
                case.status()
            )));
        }

        case.appointment.notes = self.notes.clone();
        case.appointment.updated_at = ctx.now;
        case.check_invariants()?;

        Ok(ActionResult::updated(
            case,
            vec![EventPayload::NotesUpdated {
                notes: self.notes.clone(),
            }],
        ))
    }
}
