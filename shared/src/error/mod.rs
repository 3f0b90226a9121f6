//! Unified error codes for the workshop core
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Appointment errors
//! - 5xxx: Service log errors
//! - 6xxx: Scheduling errors
//! - 9xxx: System errors
//!
//! Command failures carry a [`crate::appointment::CommandErrorCode`], which
//! maps onto these codes via `CommandErrorCode::error_code`.

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
