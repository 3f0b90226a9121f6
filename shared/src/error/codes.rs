//! Unified error codes for the workshop core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Appointment errors
//! - 5xxx: Service log errors
//! - 6xxx: Scheduling errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so callers in any language
/// can map them to user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Administrator role required
    AdminRequired = 2003,

    // ==================== 4xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 4001,
    /// Status change not permitted for the acting role
    InvalidTransition = 4002,
    /// Mutation attempted on a finalized or cancelled record
    InvalidState = 4003,
    /// Vehicle already has an active appointment
    ActiveAppointmentConflict = 4004,
    /// Record changed since it was read
    StaleState = 4005,

    // ==================== 5xxx: Service log ====================
    /// Service log not found
    ServiceLogNotFound = 5001,
    /// Checklist step does not exist in the snapshot
    UnknownChecklistStep = 5002,
    /// Part quantity must be at least one
    InvalidQuantity = 5003,
    /// Monetary amount is negative or not representable
    InvalidAmount = 5004,
    /// Service type not found in catalog
    ServiceNotFound = 5101,
    /// Spare part not found in catalog
    SparePartNotFound = 5201,

    // ==================== 6xxx: Scheduling ====================
    /// Requested time is not a bookable slot
    OutsideBusinessHours = 6001,
    /// Requested date is not a working day
    NonWorkingDay = 6002,
    /// Business hours configuration is invalid
    InvalidBusinessHours = 6003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            ErrorCode::AppointmentNotFound => "Appointment not found",
            ErrorCode::InvalidTransition => "Status change is not allowed",
            ErrorCode::InvalidState => "Record can no longer be modified",
            ErrorCode::ActiveAppointmentConflict => "Vehicle already has an active appointment",
            ErrorCode::StaleState => "Record was modified by someone else, reload and retry",

            ErrorCode::ServiceLogNotFound => "Service log not found",
            ErrorCode::UnknownChecklistStep => "Checklist step not found",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::SparePartNotFound => "Spare part not found",

            ErrorCode::OutsideBusinessHours => "Time is outside business hours",
            ErrorCode::NonWorkingDay => "Date is not a working day",
            ErrorCode::InvalidBusinessHours => "Business hours configuration is invalid",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a u16 does not name a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            8 => Ok(ErrorCode::ValueOutOfRange),

            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            4001 => Ok(ErrorCode::AppointmentNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::InvalidState),
            4004 => Ok(ErrorCode::ActiveAppointmentConflict),
            4005 => Ok(ErrorCode::StaleState),

            5001 => Ok(ErrorCode::ServiceLogNotFound),
            5002 => Ok(ErrorCode::UnknownChecklistStep),
            5003 => Ok(ErrorCode::InvalidQuantity),
            5004 => Ok(ErrorCode::InvalidAmount),
            5101 => Ok(ErrorCode::ServiceNotFound),
            5201 => Ok(ErrorCode::SparePartNotFound),

            6001 => Ok(ErrorCode::OutsideBusinessHours),
            6002 => Ok(ErrorCode::NonWorkingDay),
            6003 => Ok(ErrorCode::InvalidBusinessHours),

            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::InvalidTransition.code(), 4002);
        assert_eq!(ErrorCode::InvalidState.code(), 4003);
        assert_eq!(ErrorCode::ActiveAppointmentConflict.code(), 4004);
        assert_eq!(ErrorCode::StaleState.code(), 4005);
        assert_eq!(ErrorCode::OutsideBusinessHours.code(), 6001);
        assert_eq!(ErrorCode::NonWorkingDay.code(), 6002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_known_codes() {
        for code in [
            ErrorCode::Success,
            ErrorCode::AppointmentNotFound,
            ErrorCode::ServiceLogNotFound,
            ErrorCode::SparePartNotFound,
            ErrorCode::NonWorkingDay,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ErrorCode::ActiveAppointmentConflict.message(),
            "Vehicle already has an active appointment"
        );
        assert_eq!(ErrorCode::Success.message(), "Operation completed successfully");
    }

    #[test]
    fn test_try_from_unknown_code() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::NonWorkingDay).unwrap();
        assert_eq!(json, "6002");

        let code: ErrorCode = serde_json::from_str("4004").unwrap();
        assert_eq!(code, ErrorCode::ActiveAppointmentConflict);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }
}
