//! Bookable time slots derived from business hours
//!
//! Slots are recomputed from the [`BusinessHours`] value handed in on every
//! call; nothing is cached across configuration changes.

use chrono::{NaiveDate, NaiveTime, Timelike};
use shared::models::BusinessHours;

use crate::core::{WorkshopError, WorkshopResult};
use crate::utils::time::weekday_index;

/// Default distance between two bookable slots
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 30;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Generate the slots of the half-open window `[start, end)`
///
/// The first slot is `start`; every following slot is `step_minutes` later and
/// strictly before `end`. An empty or inverted window, or a zero step, yields
/// no slots.
pub fn generate_slots(start: NaiveTime, end: NaiveTime, step_minutes: u32) -> Vec<NaiveTime> {
    if step_minutes == 0 || start >= end {
        return Vec::new();
    }

    let step = step_minutes.saturating_mul(60);
    let end_secs = end.num_seconds_from_midnight();
    let mut slots = Vec::new();
    let mut secs = start.num_seconds_from_midnight();
    while secs < end_secs && secs < SECONDS_PER_DAY {
        if let Some(slot) = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0) {
            slots.push(slot);
        }
        secs = secs.saturating_add(step);
    }

    tracing::debug!(
        start = %start.format("%H:%M"),
        end = %end.format("%H:%M"),
        step_minutes,
        count = slots.len(),
        "Generated time slots"
    );
    slots
}

/// Slots of the given business hours
pub fn slots_for(hours: &BusinessHours, step_minutes: u32) -> Vec<NaiveTime> {
    generate_slots(hours.start, hours.end, step_minutes)
}

/// Whether `date` falls on one of the working days (0 = Sunday .. 6 = Saturday)
pub fn is_working_day(date: NaiveDate, working_days: &std::collections::BTreeSet<u8>) -> bool {
    working_days.contains(&weekday_index(date))
}

/// Whether `time` is exactly one of the generated slots
pub fn is_slot(time: NaiveTime, hours: &BusinessHours, step_minutes: u32) -> bool {
    if step_minutes == 0 || time < hours.start || time >= hours.end || time.nanosecond() != 0 {
        return false;
    }
    let offset = time.num_seconds_from_midnight() - hours.start.num_seconds_from_midnight();
    offset % step_minutes.saturating_mul(60) == 0
}

/// Check a business hours value before it replaces the current one
pub fn validate_business_hours(hours: &BusinessHours) -> WorkshopResult<()> {
    if hours.start >= hours.end {
        return Err(WorkshopError::InvalidBusinessHours(format!(
            "start {} must be before end {}",
            hours.start.format("%H:%M"),
            hours.end.format("%H:%M")
        )));
    }
    if hours.working_days.is_empty() {
        return Err(WorkshopError::InvalidBusinessHours(
            "at least one working day is required".into(),
        ));
    }
    if let Some(day) = hours.working_days.iter().find(|d| **d > 6) {
        return Err(WorkshopError::InvalidBusinessHours(format!(
            "weekday index {} is out of range 0..=6",
            day
        )));
    }
    Ok(())
}
