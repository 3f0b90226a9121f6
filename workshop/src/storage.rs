//! In-memory storage for service cases and their event stream
//!
//! # State
//!
//! | Field | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `cases` | `appointment_id` | `ServiceCase` | Current state + version |
//! | `active_by_vehicle` | `vehicle_id` | `appointment_id` | One active appointment per vehicle |
//! | `events` | position | `AppointmentEvent` | Event stream (append-only) |
//! | `processed_commands` | `command_id` | `ProcessedCommand` | Idempotency check |
//! | `sequence` | - | `u64` | Global event sequence |
//!
//! # Atomicity
//!
//! [`InMemoryStore::commit`] takes a single write lock for the whole change:
//! the version compare-and-swap, the vehicle admission re-check, the event
//! append and the processed-command mark all happen together or not at all.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared::appointment::{Appointment, AppointmentEvent};

use crate::appointments::ServiceCase;
use crate::core::{WorkshopError, WorkshopResult};

/// A change to one service case
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// New appointment; fails if the id exists or the vehicle is busy
    Insert(ServiceCase),
    /// Replace a case read at `expected_version`
    Update {
        case: ServiceCase,
        expected_version: u64,
    },
    /// Remove a case read at `expected_version`
    Delete {
        appointment_id: String,
        expected_version: u64,
    },
}

impl WriteOp {
    pub fn appointment_id(&self) -> &str {
        match self {
            WriteOp::Insert(case) | WriteOp::Update { case, .. } => case.id(),
            WriteOp::Delete { appointment_id, .. } => appointment_id,
        }
    }
}

/// Result of a successful commit
#[derive(Debug, Clone)]
pub struct Committed {
    /// Version after the write; `None` when the case was deleted
    pub version: Option<u64>,
    /// Events with their assigned sequence numbers
    pub events: Vec<AppointmentEvent>,
}

/// Backing store for service cases
///
/// Implementations must serialize writes per appointment: of two commits
/// based on the same version, exactly one succeeds and the other gets
/// `StaleState`.
pub trait AppointmentStore: Send + Sync {
    fn load(&self, appointment_id: &str) -> Option<ServiceCase>;

    /// Every stored case, ordered by appointment date, time and id
    fn all(&self) -> Vec<ServiceCase>;

    fn appointments_for_vehicle(&self, vehicle_id: &str) -> Vec<Appointment>;

    fn is_processed(&self, command_id: &str) -> bool;

    /// Apply one change, append its events and mark the command processed
    ///
    /// Returns `Ok(None)` without writing when `command_id` was already
    /// committed, so a duplicate racing past the early check is still
    /// applied at most once.
    fn commit(
        &self,
        command_id: &str,
        op: WriteOp,
        events: Vec<AppointmentEvent>,
    ) -> WorkshopResult<Option<Committed>>;

    /// Events with a sequence greater than `sequence`
    fn events_since(&self, sequence: u64) -> Vec<AppointmentEvent>;

    fn current_sequence(&self) -> u64;

    /// Forget command ids processed before `processed_before` (Unix millis)
    /// whose appointment is no longer active
    ///
    /// Ids of Pending, Confirmed and InProgress appointments are kept so
    /// retries against them stay idempotent. Returns the number removed.
    fn cleanup_command_ids(&self, processed_before: i64) -> usize;
}

#[derive(Debug, Clone)]
struct ProcessedCommand {
    appointment_id: String,
    processed_at: i64,
}

#[derive(Debug, Default)]
struct StoreState {
    cases: HashMap<String, ServiceCase>,
    active_by_vehicle: HashMap<String, String>,
    events: Vec<AppointmentEvent>,
    processed_commands: HashMap<String, ProcessedCommand>,
    sequence: u64,
}

impl StoreState {
    fn stale(case: &ServiceCase, expected: u64) -> WorkshopError {
        WorkshopError::StaleState {
            appointment_id: case.id().to_string(),
            expected,
            actual: case.version,
        }
    }

    fn reindex_vehicle(&mut self, appointment: &Appointment) {
        if appointment.is_active() {
            self.active_by_vehicle
                .insert(appointment.vehicle_id.clone(), appointment.id.clone());
        } else {
            self.release_vehicle(appointment);
        }
    }

    fn release_vehicle(&mut self, appointment: &Appointment) {
        if self
            .active_by_vehicle
            .get(&appointment.vehicle_id)
            .is_some_and(|id| *id == appointment.id)
        {
            self.active_by_vehicle.remove(&appointment.vehicle_id);
        }
    }

    /// Validate and apply one write, returning the new version
    fn apply(&mut self, op: WriteOp) -> WorkshopResult<Option<u64>> {
        match op {
            WriteOp::Insert(mut case) => {
                if self.cases.contains_key(case.id()) {
                    return Err(WorkshopError::validation(format!(
                        "Appointment {} already exists",
                        case.id()
                    )));
                }
                let vehicle_id = &case.appointment.vehicle_id;
                if case.appointment.is_active()
                    && let Some(active) = self.active_by_vehicle.get(vehicle_id)
                {
                    return Err(WorkshopError::ActiveAppointmentConflict {
                        vehicle_id: vehicle_id.clone(),
                        appointment_id: active.clone(),
                    });
                }
                case.version = 1;
                self.reindex_vehicle(&case.appointment);
                self.cases.insert(case.id().to_string(), case);
                Ok(Some(1))
            }
            WriteOp::Update {
                mut case,
                expected_version,
            } => {
                let stored = self
                    .cases
                    .get(case.id())
                    .ok_or_else(|| WorkshopError::AppointmentNotFound(case.id().to_string()))?;
                if stored.version != expected_version {
                    return Err(Self::stale(stored, expected_version));
                }
                if stored.appointment.vehicle_id != case.appointment.vehicle_id {
                    return Err(WorkshopError::Internal(format!(
                        "vehicle of appointment {} cannot change",
                        case.id()
                    )));
                }
                case.version = expected_version + 1;
                self.reindex_vehicle(&case.appointment);
                let version = case.version;
                self.cases.insert(case.id().to_string(), case);
                Ok(Some(version))
            }
            WriteOp::Delete {
                appointment_id,
                expected_version,
            } => {
                let stored = self
                    .cases
                    .get(&appointment_id)
                    .ok_or_else(|| WorkshopError::AppointmentNotFound(appointment_id.clone()))?;
                if stored.version != expected_version {
                    return Err(Self::stale(stored, expected_version));
                }
                if let Some(removed) = self.cases.remove(&appointment_id) {
                    self.release_vehicle(&removed.appointment);
                }
                Ok(None)
            }
        }
    }
}

/// Reference [`AppointmentStore`] held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cases
    pub fn len(&self) -> usize {
        self.state.read().cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AppointmentStore for InMemoryStore {
    fn load(&self, appointment_id: &str) -> Option<ServiceCase> {
        self.state.read().cases.get(appointment_id).cloned()
    }

    fn all(&self) -> Vec<ServiceCase> {
        let mut cases: Vec<ServiceCase> = self.state.read().cases.values().cloned().collect();
        cases.sort_by(|a, b| {
            (a.appointment.date, a.appointment.time, &a.appointment.id).cmp(&(
                b.appointment.date,
                b.appointment.time,
                &b.appointment.id,
            ))
        });
        cases
    }

    fn appointments_for_vehicle(&self, vehicle_id: &str) -> Vec<Appointment> {
        let state = self.state.read();
        let mut appointments: Vec<Appointment> = state
            .cases
            .values()
            .filter(|c| c.appointment.vehicle_id == vehicle_id)
            .map(|c| c.appointment.clone())
            .collect();
        appointments.sort_by(|a, b| (a.date, a.time, &a.id).cmp(&(b.date, b.time, &b.id)));
        appointments
    }

    fn is_processed(&self, command_id: &str) -> bool {
        self.state.read().processed_commands.contains_key(command_id)
    }

    fn commit(
        &self,
        command_id: &str,
        op: WriteOp,
        mut events: Vec<AppointmentEvent>,
    ) -> WorkshopResult<Option<Committed>> {
        let mut state = self.state.write();

        if state.processed_commands.contains_key(command_id) {
            return Ok(None);
        }

        let appointment_id = op.appointment_id().to_string();
        let version = state.apply(op)?;

        for event in &mut events {
            state.sequence += 1;
            event.sequence = state.sequence;
        }
        state.events.extend(events.iter().cloned());
        state.processed_commands.insert(
            command_id.to_string(),
            ProcessedCommand {
                appointment_id,
                processed_at: shared::util::now_millis(),
            },
        );

        Ok(Some(Committed { version, events }))
    }

    fn events_since(&self, sequence: u64) -> Vec<AppointmentEvent> {
        let state = self.state.read();
        // Sequences are dense and start at 1, so the tail starts at index `sequence`
        let start = usize::try_from(sequence)
            .unwrap_or(usize::MAX)
            .min(state.events.len());
        state.events[start..].to_vec()
    }

    fn current_sequence(&self) -> u64 {
        self.state.read().sequence
    }

    fn cleanup_command_ids(&self, processed_before: i64) -> usize {
        let mut state = self.state.write();
        let StoreState {
            cases,
            processed_commands,
            ..
        } = &mut *state;

        let before = processed_commands.len();
        processed_commands.retain(|_, processed| {
            processed.processed_at >= processed_before
                || cases
                    .get(&processed.appointment_id)
                    .is_some_and(|case| case.appointment.is_active())
        });
        before - processed_commands.len()
    }
}
