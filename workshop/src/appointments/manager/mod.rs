//! WorkshopManager - command processing, business hours and queries
//!
//! # Command Flow
//!
//! ```text
//! execute_command(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Snapshot current business hours
//!     ├─ 3. Create CommandContext
//!     ├─ 4. Convert command to action and execute on a copy of the case
//!     ├─ 5. Stamp events with operator and command
//!     ├─ 6. Commit (version compare-and-swap, vehicle re-check, events, processed mark)
//!     └─ 7. Return response
//! ```
//!
//! Rejections never change stored state: a failed action or a failed commit
//! leaves the case exactly as it was read.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use parking_lot::RwLock;
use shared::appointment::{
    Appointment, AppointmentCommand, AppointmentEvent, AppointmentStatus, ChecklistProgress,
    CommandError, CommandResponse, EventPayload,
};
use shared::models::{Actor, ActorRole, BusinessHours, BusinessHoursUpdate};

use super::actions::CommandAction;
use super::aggregate::ServiceCase;
use super::traits::{CaseChange, CommandContext, CommandHandler, CommandMetadata};
use crate::catalog::CatalogLookup;
use crate::core::{Config, WorkshopError, WorkshopResult};
use crate::scheduling::{self, DEFAULT_SLOT_STEP_MINUTES};
use crate::storage::{AppointmentStore, WriteOp};
use crate::utils::logger::AUDIT_TARGET;

/// Command processor for appointments and service logs
pub struct WorkshopManager {
    store: Arc<dyn AppointmentStore>,
    catalog: Arc<dyn CatalogLookup>,
    /// Administrator-owned; read fresh by every validating command
    business_hours: RwLock<BusinessHours>,
    slot_step_minutes: u32,
}

impl std::fmt::Debug for WorkshopManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkshopManager")
            .field("business_hours", &*self.business_hours.read())
            .field("slot_step_minutes", &self.slot_step_minutes)
            .finish_non_exhaustive()
    }
}

impl WorkshopManager {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogLookup>,
        business_hours: BusinessHours,
        slot_step_minutes: u32,
    ) -> WorkshopResult<Self> {
        scheduling::validate_business_hours(&business_hours)?;
        let slot_step_minutes = if slot_step_minutes == 0 {
            tracing::warn!(
                "Slot step of 0 minutes, using {} instead",
                DEFAULT_SLOT_STEP_MINUTES
            );
            DEFAULT_SLOT_STEP_MINUTES
        } else {
            slot_step_minutes
        };

        tracing::info!(
            start = %business_hours.start.format("%H:%M"),
            end = %business_hours.end.format("%H:%M"),
            working_days = ?business_hours.working_days,
            slot_step_minutes,
            "WorkshopManager started"
        );

        Ok(Self {
            store,
            catalog,
            business_hours: RwLock::new(business_hours),
            slot_step_minutes,
        })
    }

    /// Build a manager with the business hours and slot step of `config`
    pub fn from_config(
        config: &Config,
        store: Arc<dyn AppointmentStore>,
        catalog: Arc<dyn CatalogLookup>,
    ) -> WorkshopResult<Self> {
        Self::new(
            store,
            catalog,
            config.business_hours.clone(),
            config.slot_step_minutes,
        )
    }

    pub fn store(&self) -> &dyn AppointmentStore {
        self.store.as_ref()
    }

    pub fn slot_step_minutes(&self) -> u32 {
        self.slot_step_minutes
    }

    // ========== Commands ==========

    /// Execute a command and return the response
    pub fn execute_command(&self, cmd: AppointmentCommand) -> CommandResponse {
        self.execute_command_with_events(cmd).0
    }

    /// Execute a command and return both the response and the committed events
    pub fn execute_command_with_events(
        &self,
        cmd: AppointmentCommand,
    ) -> (CommandResponse, Vec<AppointmentEvent>) {
        match self.process_command(&cmd) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    command_id = %cmd.command_id,
                    appointment_id = ?cmd.payload.appointment_id(),
                    actor_id = %cmd.actor.id,
                    role = %cmd.actor.role,
                    error = %err,
                    "Command rejected"
                );
                let error: CommandError = err.into();
                (CommandResponse::error(cmd.command_id, error), vec![])
            }
        }
    }

    fn process_command(
        &self,
        cmd: &AppointmentCommand,
    ) -> WorkshopResult<(CommandResponse, Vec<AppointmentEvent>)> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Idempotency check
        if self.store.is_processed(&cmd.command_id) {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id.clone()), vec![]));
        }

        // 2-3. Context with the business hours as they are right now
        let ctx = CommandContext::new(
            self.store.as_ref(),
            self.catalog.as_ref(),
            self.business_hours(),
            self.slot_step_minutes,
        );
        let metadata = CommandMetadata {
            command_id: cmd.command_id.clone(),
            actor: cmd.actor.clone(),
            timestamp: cmd.timestamp,
            expected_version: cmd.expected_version,
        };

        // 4. Execute action
        let action = CommandAction::from(cmd);
        let result = action.execute(&ctx, &metadata)?;

        let appointment_id = result.change.case().id().to_string();

        // 5. Stamp events
        let events: Vec<AppointmentEvent> = result
            .events
            .into_iter()
            .map(|payload| {
                AppointmentEvent::new(
                    appointment_id.clone(),
                    &cmd.actor,
                    cmd.command_id.clone(),
                    ctx.now,
                    payload,
                )
            })
            .collect();

        // 6. Commit
        let op = match result.change {
            CaseChange::Created(case) => WriteOp::Insert(case),
            CaseChange::Updated(case) => WriteOp::Update {
                expected_version: case.version,
                case,
            },
            CaseChange::Deleted(case) => WriteOp::Delete {
                expected_version: case.version,
                appointment_id: appointment_id.clone(),
            },
            CaseChange::Unchanged(case) => {
                return Ok((
                    CommandResponse::success(
                        cmd.command_id.clone(),
                        appointment_id,
                        Some(case.version),
                    ),
                    vec![],
                ));
            }
        };

        let Some(committed) = self.store.commit(&cmd.command_id, op, events)? else {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id.clone()), vec![]));
        };

        for event in &committed.events {
            audit(event);
        }

        // 7. Response
        tracing::info!(
            command_id = %cmd.command_id,
            appointment_id = %appointment_id,
            version = ?committed.version,
            event_count = committed.events.len(),
            "Command processed successfully"
        );
        Ok((
            CommandResponse::success(cmd.command_id.clone(), appointment_id, committed.version),
            committed.events,
        ))
    }

    // ========== Business Hours ==========

    /// Current business hours
    pub fn business_hours(&self) -> BusinessHours {
        self.business_hours.read().clone()
    }

    /// Replace parts of the business hours (administrators only)
    ///
    /// Existing appointments are not revalidated; the new hours apply to the
    /// next creation or reschedule.
    pub fn update_business_hours(
        &self,
        actor: &Actor,
        update: &BusinessHoursUpdate,
    ) -> WorkshopResult<BusinessHours> {
        if actor.role != ActorRole::Administrator {
            return Err(WorkshopError::permission_denied(
                "only administrators change business hours",
            ));
        }

        let mut current = self.business_hours.write();
        let updated = current.merged(update);
        scheduling::validate_business_hours(&updated)?;

        tracing::info!(
            target: AUDIT_TARGET,
            actor_id = %actor.id,
            start = %updated.start.format("%H:%M"),
            end = %updated.end.format("%H:%M"),
            working_days = ?updated.working_days,
            "Business hours updated"
        );
        *current = updated.clone();
        Ok(updated)
    }

    // ========== Queries ==========

    /// Bookable slots of `date` under the current business hours
    pub fn available_slots(&self, date: NaiveDate) -> WorkshopResult<Vec<NaiveTime>> {
        let hours = self.business_hours();
        if !scheduling::is_working_day(date, &hours.working_days) {
            return Err(WorkshopError::NonWorkingDay { date });
        }
        Ok(scheduling::slots_for(&hours, self.slot_step_minutes))
    }

    pub fn get_case(&self, appointment_id: &str) -> Option<ServiceCase> {
        self.store.load(appointment_id)
    }

    pub fn appointments_for_vehicle(&self, vehicle_id: &str) -> Vec<Appointment> {
        self.store.appointments_for_vehicle(vehicle_id)
    }

    /// Appointments assigned to a technician, ordered by date and time
    pub fn appointments_for_technician(&self, technician_id: &str) -> Vec<Appointment> {
        self.store
            .all()
            .into_iter()
            .map(|case| case.appointment)
            .filter(|a| a.is_assigned_to(technician_id))
            .collect()
    }

    /// Informational checklist completion of an appointment's log
    pub fn checklist_progress(&self, appointment_id: &str) -> WorkshopResult<ChecklistProgress> {
        let case = self
            .get_case(appointment_id)
            .ok_or_else(|| WorkshopError::AppointmentNotFound(appointment_id.to_string()))?;
        case.progress()
            .ok_or_else(|| WorkshopError::ServiceLogNotFound(appointment_id.to_string()))
    }

    /// Number of appointments per status; every status is present
    pub fn status_summary(&self) -> BTreeMap<AppointmentStatus, usize> {
        let mut summary: BTreeMap<AppointmentStatus, usize> =
            AppointmentStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for case in self.store.all() {
            *summary.entry(case.status()).or_default() += 1;
        }
        summary
    }

    pub fn current_sequence(&self) -> u64 {
        self.store.current_sequence()
    }

    /// Events after `sequence`, for clients catching up
    pub fn events_since(&self, sequence: u64) -> Vec<AppointmentEvent> {
        self.store.events_since(sequence)
    }

    // ========== Maintenance ==========

    /// Drop idempotency records older than `retention` for appointments that
    /// are finished, cancelled or deleted
    pub fn cleanup_command_ids(&self, retention: chrono::Duration) -> usize {
        let cutoff = shared::util::now_millis().saturating_sub(retention.num_milliseconds());
        let removed = self.store.cleanup_command_ids(cutoff);
        if removed > 0 {
            tracing::info!(removed, cutoff, "Cleaned up processed command ids");
        }
        removed
    }
}

/// Permanent record of committed status changes, assignments, finalizations
/// and deletions
///
/// Called only after the store accepted the write; handlers never log the
/// change themselves.
fn audit(event: &AppointmentEvent) {
    match &event.payload {
        EventPayload::StatusChanged { from, to } => tracing::info!(
            target: AUDIT_TARGET,
            appointment_id = %event.appointment_id,
            operator_id = %event.operator_id,
            role = %event.operator_role,
            from = %from,
            to = %to,
            sequence = event.sequence,
            "Status changed"
        ),
        EventPayload::TechnicianAssigned {
            technician_id,
            previous,
        } => tracing::info!(
            target: AUDIT_TARGET,
            appointment_id = %event.appointment_id,
            operator_id = %event.operator_id,
            technician_id = %technician_id,
            previous = ?previous,
            sequence = event.sequence,
            "Technician assigned"
        ),
        EventPayload::ServiceFinalized {
            final_cost,
            checklist_forced: true,
            ..
        } => tracing::warn!(
            target: AUDIT_TARGET,
            appointment_id = %event.appointment_id,
            operator_id = %event.operator_id,
            final_cost = %final_cost,
            sequence = event.sequence,
            "Service finalized with checklist force-completed"
        ),
        EventPayload::ServiceFinalized {
            final_cost,
            checklist_forced,
            ..
        } => tracing::info!(
            target: AUDIT_TARGET,
            appointment_id = %event.appointment_id,
            operator_id = %event.operator_id,
            final_cost = %final_cost,
            checklist_forced,
            sequence = event.sequence,
            "Service finalized"
        ),
        EventPayload::AppointmentDeleted { status } => tracing::info!(
            target: AUDIT_TARGET,
            appointment_id = %event.appointment_id,
            operator_id = %event.operator_id,
            status = %status,
            sequence = event.sequence,
            "Appointment deleted"
        ),
        _ => {}
    }
}

#[cfg(test)]
mod tests;
