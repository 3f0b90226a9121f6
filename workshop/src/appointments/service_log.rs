//! Service log accumulation
//!
//! A log is opened once per appointment from the catalog entry of its service,
//! edited while the appointment is open, and locked for good when the
//! appointment is finalized. All functions work on a [`ServiceCase`] so the
//! appointment status is always at hand.

use rust_decimal::Decimal;
use shared::appointment::{
    AppointmentStatus, ChecklistSnapshot, EventPayload, PartUsage, PartUsageInput, ServiceLog,
};
use shared::models::{Actor, ActorRole, ChecklistTemplate};

use super::aggregate::ServiceCase;
use super::lifecycle;
use crate::catalog::CatalogLookup;
use crate::core::{WorkshopError, WorkshopResult};
use crate::money;

/// Staff and the assigned technician work on the log; clients do not
pub fn authorize_log_access(actor: &Actor, case: &ServiceCase) -> WorkshopResult<()> {
    match actor.role {
        ActorRole::Receptionist | ActorRole::Administrator => Ok(()),
        ActorRole::Technician if case.appointment.is_assigned_to(&actor.id) => Ok(()),
        ActorRole::Technician => Err(WorkshopError::permission_denied(format!(
            "technician {} is not assigned to appointment {}",
            actor.id,
            case.id()
        ))),
        ActorRole::Client => Err(WorkshopError::permission_denied(
            "clients cannot work on service logs",
        )),
    }
}

/// Return the existing log, or open one from the catalog
///
/// An existing log is returned untouched, whatever the catalog now says.
/// A service missing from the catalog opens with a zero base cost and an
/// empty checklist. Returns whether a new log was created.
pub fn create_or_load(
    case: &mut ServiceCase,
    catalog: &dyn CatalogLookup,
    now: i64,
) -> WorkshopResult<bool> {
    if case.service_log.is_some() {
        return Ok(false);
    }
    if case.appointment.is_terminal() {
        return Err(WorkshopError::invalid_state(format!(
            "appointment {} is {}, a service log can no longer be opened",
            case.id(),
            case.status()
        )));
    }

    let service_id = case.appointment.service_id.clone();
    let (base_cost, template) = match catalog.service(&service_id) {
        Some(entry) => (entry.base_cost, entry.checklist_template),
        None => {
            tracing::warn!(
                appointment_id = %case.id(),
                service_id = %service_id,
                "Service not in catalog, opening log with zero base cost"
            );
            (Decimal::ZERO, ChecklistTemplate::default())
        }
    };

    let checklist = ChecklistSnapshot::from_template(&template);
    tracing::debug!(
        appointment_id = %case.id(),
        steps = checklist.len(),
        base_cost = %base_cost,
        "Preparing service log"
    );

    case.service_log = Some(ServiceLog {
        appointment_id: case.appointment.id.clone(),
        service_id,
        final_cost: money::compute_total(base_cost, &[]),
        base_cost,
        checklist,
        parts_used: Vec::new(),
        observations: String::new(),
        created_at: now,
        completed_at: None,
    });
    case.check_invariants()?;
    Ok(true)
}

/// The log may still be edited: it exists, is not locked, and the appointment is open
pub fn ensure_editable(case: &ServiceCase) -> WorkshopResult<()> {
    let log = case.log()?;
    if log.is_locked() || case.status() == AppointmentStatus::Finalized {
        return Err(WorkshopError::invalid_state(format!(
            "service log of appointment {} is finalized",
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
    Ok(())
}

/// Flip one checklist step, returning its new value
pub fn toggle_step(case: &mut ServiceCase, step: &str) -> WorkshopResult<bool> {
    ensure_editable(case)?;
    let done = case
        .log_mut()?
        .checklist
        .toggle(step)
        .ok_or_else(|| WorkshopError::UnknownChecklistStep(step.to_string()))?;
    case.check_invariants()?;
    Ok(done)
}

/// Replace the parts list and recompute the stored total
///
/// Repeated part ids are merged in first-seen order. A part already in the
/// log keeps the unit cost recorded when it was first used; new parts are
/// priced from the catalog now.
pub fn set_parts(
    case: &mut ServiceCase,
    parts: &[PartUsageInput],
    catalog: &dyn CatalogLookup,
) -> WorkshopResult<()> {
    ensure_editable(case)?;
    money::validate_parts(parts)?;

    let mut merged: Vec<(String, u32)> = Vec::with_capacity(parts.len());
    for input in parts {
        match merged.iter_mut().find(|(id, _)| *id == input.part_id) {
            Some((id, quantity)) => {
                *quantity = quantity.saturating_add(input.quantity);
                money::validate_quantity(id, *quantity)?;
            }
            None => merged.push((input.part_id.clone(), input.quantity)),
        }
    }

    let log = case.log_mut()?;
    let mut priced = Vec::with_capacity(merged.len());
    for (part_id, quantity) in merged {
        let unit_cost = match log.parts_used.iter().find(|p| p.part_id == part_id) {
            Some(recorded) => recorded.unit_cost,
            None => catalog
                .spare_part(&part_id)
                .map(|part| part.unit_cost)
                .ok_or_else(|| WorkshopError::SparePartNotFound(part_id.clone()))?,
        };
        money::validate_cost(unit_cost, "unit_cost")?;
        priced.push(PartUsage {
            part_id,
            quantity,
            unit_cost,
        });
    }

    let final_cost = money::compute_total(log.base_cost, &priced);
    money::validate_cost(final_cost, "final_cost")?;
    log.parts_used = priced;
    log.final_cost = final_cost;

    tracing::debug!(
        appointment_id = %log.appointment_id,
        parts = log.parts_used.len(),
        final_cost = %log.final_cost,
        "Service log parts updated"
    );
    case.check_invariants()
}

pub fn update_observations(case: &mut ServiceCase, observations: &str) -> WorkshopResult<()> {
    ensure_editable(case)?;
    case.log_mut()?.observations = observations.to_string();
    case.check_invariants()
}

/// Lock a log: recompute and freeze the total, stamp `completed_at`
///
/// Fails with `InvalidState` on an already locked log, so a log is locked at
/// most once.
pub fn lock(log: &mut ServiceLog, now: i64) -> WorkshopResult<i64> {
    if log.is_locked() {
        return Err(WorkshopError::invalid_state(format!(
            "service log of appointment {} is already finalized",
            log.appointment_id
        )));
    }
    for part in &log.parts_used {
        money::validate_quantity(&part.part_id, part.quantity)?;
        money::validate_cost(part.unit_cost, "unit_cost")?;
    }
    let final_cost = money::compute_total(log.base_cost, &log.parts_used);
    money::validate_cost(final_cost, "final_cost")?;

    log.final_cost = final_cost;
    log.completed_at = Some(now);
    Ok(now)
}

/// "Mark service completed": tick every step, lock the log and finalize the appointment
///
/// Every step ends up done even if it was never checked; the emitted
/// `ServiceFinalized` event records whether steps were forced.
pub fn finalize(
    case: &mut ServiceCase,
    actor: &Actor,
    now: i64,
) -> WorkshopResult<Vec<EventPayload>> {
    ensure_editable(case)?;
    lifecycle::authorize_transition(actor, &case.appointment, AppointmentStatus::Finalized)?;

    let log = case.log_mut()?;
    let forced = !log.checklist.is_complete();
    log.checklist.complete_all();

    let mut events = lifecycle::transition(case, actor, AppointmentStatus::Finalized, now)?;
    for event in &mut events {
        if let EventPayload::ServiceFinalized {
            checklist_forced, ..
        } = event
        {
            *checklist_forced = forced;
        }
    }
    Ok(events)
}
