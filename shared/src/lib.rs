//! Shared types for the workshop core
//!
//! Domain records, commands, events and error codes used by the
//! `workshop` crate and by any application embedding it.

pub mod appointment;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use appointment::{Appointment, AppointmentStatus, ServiceLog};
pub use error::{ErrorCategory, ErrorCode};
pub use models::{Actor, ActorRole, BusinessHours};
