//! Appointment record and status

use chrono::NaiveDate;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Appointment status
///
/// `Pending` is initial; `Finalized` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Finalized,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Finalized,
        AppointmentStatus::Cancelled,
    ];

    /// Terminal states have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Finalized | AppointmentStatus::Cancelled)
    }

    /// Non-terminal states count against the one-active-appointment-per-vehicle rule
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "PENDING"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AppointmentStatus::InProgress => write!(f, "IN_PROGRESS"),
            AppointmentStatus::Finalized => write!(f, "FINALIZED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Scheduled service visit
///
/// `date` is a local calendar day, never a UTC instant, so the weekday is
/// computed from the date alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub vehicle_id: String,
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "crate::util::hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `technician_id` is the technician assigned to this appointment
    pub fn is_assigned_to(&self, technician_id: &str) -> bool {
        self.technician_id.as_deref() == Some(technician_id)
    }
}
