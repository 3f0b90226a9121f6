//! Domain error type for every core operation
//!
//! All rule violations come back as a [`WorkshopError`]; nothing in the core
//! panics on an expected failure. At the command boundary the error is turned
//! into a serializable [`CommandError`] for the caller to localise.

use chrono::{NaiveDate, NaiveTime};
use shared::appointment::{AppointmentStatus, CommandError, CommandErrorCode};
use shared::models::ActorRole;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkshopError {
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Cannot change status from {from} to {to} as {role}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
        role: ActorRole,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Vehicle {vehicle_id} already has active appointment {appointment_id}")]
    ActiveAppointmentConflict {
        vehicle_id: String,
        appointment_id: String,
    },

    #[error("{time} is outside business hours")]
    OutsideBusinessHours { time: NaiveTime },

    #[error("{date} is not a working day")]
    NonWorkingDay { date: NaiveDate },

    #[error("Appointment {appointment_id} changed: expected version {expected}, found {actual}")]
    StaleState {
        appointment_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Service log not found for appointment {0}")]
    ServiceLogNotFound(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Spare part not found: {0}")]
    SparePartNotFound(String),

    #[error("Checklist step not found: {0}")]
    UnknownChecklistStep(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid business hours: {0}")]
    InvalidBusinessHours(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkshopError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> CommandErrorCode {
        match self {
            Self::AppointmentNotFound(_) => CommandErrorCode::AppointmentNotFound,
            Self::InvalidTransition { .. } => CommandErrorCode::InvalidTransition,
            Self::InvalidState(_) => CommandErrorCode::InvalidState,
            Self::ActiveAppointmentConflict { .. } => CommandErrorCode::ActiveAppointmentConflict,
            Self::OutsideBusinessHours { .. } => CommandErrorCode::OutsideBusinessHours,
            Self::NonWorkingDay { .. } => CommandErrorCode::NonWorkingDay,
            Self::StaleState { .. } => CommandErrorCode::StaleState,
            Self::ServiceLogNotFound(_) => CommandErrorCode::ServiceLogNotFound,
            Self::ServiceNotFound(_) => CommandErrorCode::ServiceNotFound,
            Self::SparePartNotFound(_) => CommandErrorCode::SparePartNotFound,
            Self::UnknownChecklistStep(_) => CommandErrorCode::UnknownChecklistStep,
            Self::InvalidQuantity(_) => CommandErrorCode::InvalidQuantity,
            Self::InvalidAmount(_) => CommandErrorCode::InvalidAmount,
            Self::PermissionDenied(_) => CommandErrorCode::PermissionDenied,
            Self::Validation(_) => CommandErrorCode::ValidationFailed,
            Self::InvalidBusinessHours(_) => CommandErrorCode::InvalidBusinessHours,
            Self::Internal(_) => CommandErrorCode::InternalError,
        }
    }
}

impl From<WorkshopError> for CommandError {
    fn from(err: WorkshopError) -> Self {
        if let WorkshopError::Internal(msg) = &err {
            tracing::error!(error = %msg, "Internal error while processing command");
        }
        CommandError::new(err.code(), err.to_string())
    }
}

pub type WorkshopResult<T> = Result<T, WorkshopError>;
