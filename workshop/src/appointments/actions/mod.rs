//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific command type.

use shared::appointment::{AppointmentCommand, AppointmentCommandPayload};

use crate::appointments::traits::{ActionResult, CommandContext, CommandHandler, CommandMetadata};
use crate::core::WorkshopResult;

mod assign_technician;
mod change_status;
mod create_appointment;
mod delete_appointment;
mod finalize_service;
mod open_service_log;
mod reschedule;
mod set_parts;
mod toggle_checklist_step;
mod update_notes;
mod update_observations;

#[cfg(test)]
pub(crate) mod test_support;

pub use assign_technician::AssignTechnicianAction;
pub use change_status::ChangeStatusAction;
pub use create_appointment::CreateAppointmentAction;
pub use delete_appointment::DeleteAppointmentAction;
pub use finalize_service::FinalizeServiceAction;
pub use open_service_log::OpenServiceLogAction;
pub use reschedule::RescheduleAction;
pub use set_parts::SetPartsAction;
pub use toggle_checklist_step::ToggleChecklistStepAction;
pub use update_notes::UpdateNotesAction;
pub use update_observations::UpdateObservationsAction;

/// CommandAction enum - dispatches to concrete action implementations
#[derive(Debug, Clone)]
pub enum CommandAction {
    CreateAppointment(CreateAppointmentAction),
    ChangeStatus(ChangeStatusAction),
    AssignTechnician(AssignTechnicianAction),
    Reschedule(RescheduleAction),
    UpdateNotes(UpdateNotesAction),
    DeleteAppointment(DeleteAppointmentAction),
    OpenServiceLog(OpenServiceLogAction),
    ToggleChecklistStep(ToggleChecklistStepAction),
    SetParts(SetPartsAction),
    UpdateObservations(UpdateObservationsAction),
    FinalizeService(FinalizeServiceAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult> {
        match self {
            CommandAction::CreateAppointment(action) => action.execute(ctx, metadata),
            CommandAction::ChangeStatus(action) => action.execute(ctx, metadata),
            CommandAction::AssignTechnician(action) => action.execute(ctx, metadata),
            CommandAction::Reschedule(action) => action.execute(ctx, metadata),
            CommandAction::UpdateNotes(action) => action.execute(ctx, metadata),
            CommandAction::DeleteAppointment(action) => action.execute(ctx, metadata),
            CommandAction::OpenServiceLog(action) => action.execute(ctx, metadata),
            CommandAction::ToggleChecklistStep(action) => action.execute(ctx, metadata),
            CommandAction::SetParts(action) => action.execute(ctx, metadata),
            CommandAction::UpdateObservations(action) => action.execute(ctx, metadata),
            CommandAction::FinalizeService(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert AppointmentCommand to CommandAction
///
/// This is the ONLY place with a match on AppointmentCommandPayload.
impl From<&AppointmentCommand> for CommandAction {
    fn from(cmd: &AppointmentCommand) -> Self {
        match &cmd.payload {
            AppointmentCommandPayload::CreateAppointment {
                appointment_id,
                client_id,
                vehicle_id,
                service_id,
                technician_id,
                date,
                time,
                notes,
            } => CommandAction::CreateAppointment(CreateAppointmentAction {
                appointment_id: appointment_id.clone(),
                client_id: client_id.clone(),
                vehicle_id: vehicle_id.clone(),
                service_id: service_id.clone(),
                technician_id: technician_id.clone(),
                date: *date,
                time: *time,
                notes: notes.clone(),
            }),
            AppointmentCommandPayload::ChangeStatus {
                appointment_id,
                status,
            } => CommandAction::ChangeStatus(ChangeStatusAction {
                appointment_id: appointment_id.clone(),
                status: *status,
            }),
            AppointmentCommandPayload::AssignTechnician {
                appointment_id,
                technician_id,
            } => CommandAction::AssignTechnician(AssignTechnicianAction {
                appointment_id: appointment_id.clone(),
                technician_id: technician_id.clone(),
            }),
            AppointmentCommandPayload::Reschedule {
                appointment_id,
                date,
                time,
            } => CommandAction::Reschedule(RescheduleAction {
                appointment_id: appointment_id.clone(),
                date: *date,
                time: *time,
            }),
            AppointmentCommandPayload::UpdateNotes {
                appointment_id,
                notes,
            } => CommandAction::UpdateNotes(UpdateNotesAction {
                appointment_id: appointment_id.clone(),
                notes: notes.clone(),
            }),
            AppointmentCommandPayload::DeleteAppointment { appointment_id } => {
                CommandAction::DeleteAppointment(DeleteAppointmentAction {
                    appointment_id: appointment_id.clone(),
                })
            }
            AppointmentCommandPayload::OpenServiceLog { appointment_id } => {
                CommandAction::OpenServiceLog(OpenServiceLogAction {
                    appointment_id: appointment_id.clone(),
                })
            }
            AppointmentCommandPayload::ToggleChecklistStep {
                appointment_id,
                step,
            } => CommandAction::ToggleChecklistStep(ToggleChecklistStepAction {
                appointment_id: appointment_id.clone(),
                step: step.clone(),
            }),
            AppointmentCommandPayload::SetParts {
                appointment_id,
                parts,
            } => CommandAction::SetParts(SetPartsAction {
                appointment_id: appointment_id.clone(),
                parts: parts.clone(),
            }),
            AppointmentCommandPayload::UpdateObservations {
                appointment_id,
                observations,
            } => CommandAction::UpdateObservations(UpdateObservationsAction {
                appointment_id: appointment_id.clone(),
                observations: observations.clone(),
            }),
            AppointmentCommandPayload::FinalizeService { appointment_id } => {
                CommandAction::FinalizeService(FinalizeServiceAction {
                    appointment_id: appointment_id.clone(),
                })
            }
        }
    }
}
