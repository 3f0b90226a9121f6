//! Command handler plumbing shared by every action

use chrono::{NaiveDate, NaiveTime};
use shared::appointment::EventPayload;
use shared::models::{Actor, BusinessHours};

use super::aggregate::ServiceCase;
use crate::catalog::CatalogLookup;
use crate::core::{WorkshopError, WorkshopResult};
use crate::scheduling;
use crate::storage::AppointmentStore;

/// Command metadata extracted from the envelope
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    pub actor: Actor,
    pub timestamp: i64,
    pub expected_version: Option<u64>,
}

/// Everything an action may read while deciding
///
/// `business_hours` is the value current when the command started; actions
/// validate against it and never against a cached copy.
pub struct CommandContext<'a> {
    pub store: &'a dyn AppointmentStore,
    pub catalog: &'a dyn CatalogLookup,
    pub business_hours: BusinessHours,
    pub slot_step_minutes: u32,
    /// Server time (Unix milliseconds)
    pub now: i64,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        store: &'a dyn AppointmentStore,
        catalog: &'a dyn CatalogLookup,
        business_hours: BusinessHours,
        slot_step_minutes: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            business_hours,
            slot_step_minutes,
            now: shared::util::now_millis(),
        }
    }

    /// Load a case, rejecting it when the caller read an older version
    pub fn load_case(
        &self,
        appointment_id: &str,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ServiceCase> {
        let case = self
            .store
            .load(appointment_id)
            .ok_or_else(|| WorkshopError::AppointmentNotFound(appointment_id.to_string()))?;

        if let Some(expected) = metadata.expected_version
            && expected != case.version
        {
            return Err(WorkshopError::StaleState {
                appointment_id: appointment_id.to_string(),
                expected,
                actual: case.version,
            });
        }
        Ok(case)
    }

    pub fn validate_slot(&self, date: NaiveDate, time: NaiveTime) -> WorkshopResult<()> {
        scheduling::validate_slot(date, time, &self.business_hours, self.slot_step_minutes)
    }
}

/// What an action did to its case
#[derive(Debug, Clone)]
pub enum CaseChange {
    Created(ServiceCase),
    /// Replaces the stored case; `version` still holds the version it was read at
    Updated(ServiceCase),
    Deleted(ServiceCase),
    /// Nothing to write (e.g. opening a log that already exists)
    Unchanged(ServiceCase),
}

impl CaseChange {
    pub fn case(&self) -> &ServiceCase {
        match self {
            CaseChange::Created(case)
            | CaseChange::Updated(case)
            | CaseChange::Deleted(case)
            | CaseChange::Unchanged(case) => case,
        }
    }
}

/// Outcome of a successful action, before it is committed
#[derive(Debug, Clone)]
pub struct ActionResult {
    pub change: CaseChange,
    pub events: Vec<EventPayload>,
}

impl ActionResult {
    pub fn created(case: ServiceCase, events: Vec<EventPayload>) -> Self {
        Self {
            change: CaseChange::Created(case),
            events,
        }
    }

    pub fn updated(case: ServiceCase, events: Vec<EventPayload>) -> Self {
        Self {
            change: CaseChange::Updated(case),
            events,
        }
    }

    pub fn deleted(case: ServiceCase, event: EventPayload) -> Self {
        Self {
            change: CaseChange::Deleted(case),
            events: vec![event],
        }
    }

    pub fn unchanged(case: ServiceCase) -> Self {
        Self {
            change: CaseChange::Unchanged(case),
            events: Vec::new(),
        }
    }
}

/// One command type
///
/// Actions work on a copy of the case. Nothing they do is visible until the
/// manager commits the returned change.
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> WorkshopResult<ActionResult>;
}
