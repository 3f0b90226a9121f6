//! Admission checks run before an appointment is created or moved
//!
//! The vehicle check reads an already-fetched appointment list. It closes the
//! check-then-act race only together with the store, which repeats the check
//! inside the same write lock as the insert.

use chrono::{NaiveDate, NaiveTime};
use shared::appointment::Appointment;
use shared::models::BusinessHours;

use super::time_slots::{is_slot, is_working_day};
use crate::core::{WorkshopError, WorkshopResult};

/// Reject when the vehicle already has a Pending, Confirmed or InProgress appointment
pub fn can_create(vehicle_id: &str, existing: &[Appointment]) -> WorkshopResult<()> {
    match existing
        .iter()
        .find(|a| a.vehicle_id == vehicle_id && a.is_active())
    {
        Some(active) => {
            tracing::warn!(
                vehicle_id = %vehicle_id,
                appointment_id = %active.id,
                status = %active.status,
                "Vehicle already has an active appointment"
            );
            Err(WorkshopError::ActiveAppointmentConflict {
                vehicle_id: vehicle_id.to_string(),
                appointment_id: active.id.clone(),
            })
        }
        None => Ok(()),
    }
}

/// Reject a date that is not a working day, then a time that is not a slot
pub fn validate_slot(
    date: NaiveDate,
    time: NaiveTime,
    hours: &BusinessHours,
    step_minutes: u32,
) -> WorkshopResult<()> {
    if !is_working_day(date, &hours.working_days) {
        return Err(WorkshopError::NonWorkingDay { date });
    }
    if !is_slot(time, hours, step_minutes) {
        return Err(WorkshopError::OutsideBusinessHours { time });
    }
    Ok(())
}
