//! Command results and error codes

use crate::error::ErrorCode;
use serde::{Deserialize, Serialize};

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes, one per failure kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    AppointmentNotFound,
    InvalidTransition,
    InvalidState,
    ActiveAppointmentConflict,
    OutsideBusinessHours,
    NonWorkingDay,
    StaleState,
    ServiceLogNotFound,
    ServiceNotFound,
    SparePartNotFound,
    UnknownChecklistStep,
    InvalidQuantity,
    InvalidAmount,
    PermissionDenied,
    ValidationFailed,
    InvalidBusinessHours,
    InternalError,
}

impl CommandErrorCode {
    /// Numeric code for cross-language consumers
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::AppointmentNotFound => ErrorCode::AppointmentNotFound,
            Self::InvalidTransition => ErrorCode::InvalidTransition,
            Self::InvalidState => ErrorCode::InvalidState,
            Self::ActiveAppointmentConflict => ErrorCode::ActiveAppointmentConflict,
            Self::OutsideBusinessHours => ErrorCode::OutsideBusinessHours,
            Self::NonWorkingDay => ErrorCode::NonWorkingDay,
            Self::StaleState => ErrorCode::StaleState,
            Self::ServiceLogNotFound => ErrorCode::ServiceLogNotFound,
            Self::ServiceNotFound => ErrorCode::ServiceNotFound,
            Self::SparePartNotFound => ErrorCode::SparePartNotFound,
            Self::UnknownChecklistStep => ErrorCode::UnknownChecklistStep,
            Self::InvalidQuantity => ErrorCode::InvalidQuantity,
            Self::InvalidAmount => ErrorCode::InvalidAmount,
            Self::PermissionDenied => ErrorCode::PermissionDenied,
            Self::ValidationFailed => ErrorCode::ValidationFailed,
            Self::InvalidBusinessHours => ErrorCode::InvalidBusinessHours,
            Self::InternalError => ErrorCode::InternalError,
        }
    }
}

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Affected appointment (new ID for CreateAppointment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    /// Version of the appointment after the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Whether the command was already processed earlier
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, appointment_id: String, version: Option<u64>) -> Self {
        Self {
            command_id,
            success: true,
            appointment_id: Some(appointment_id),
            version,
            duplicate: false,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            appointment_id: None,
            version: None,
            duplicate: false,
            error: Some(error),
        }
    }

    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            appointment_id: None,
            version: None,
            duplicate: true,
            error: None,
        }
    }

    /// Error code if the command failed
    pub fn error_code(&self) -> Option<CommandErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// Informational checklist completion (never gates a transition)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
}

impl ChecklistProgress {
    /// Whole-number percentage; an empty checklist counts as complete
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.done * 100) / self.total) as u8
    }
}
