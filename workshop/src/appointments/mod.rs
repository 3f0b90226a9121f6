//! Appointment lifecycle and service fulfillment
//!
//! - [`lifecycle`] - status table and transitions
//! - [`service_log`] - checklist, parts and finalization of a service log
//! - [`aggregate`] - [`ServiceCase`], the unit every command reads and writes
//! - [`actions`] - one handler per command
//! - [`manager`] - command pipeline, idempotency, versioning and queries

pub mod actions;
pub mod aggregate;
pub mod lifecycle;
pub mod manager;
pub mod service_log;
pub mod traits;

pub use aggregate::ServiceCase;
pub use manager::WorkshopManager;
pub use traits::{ActionResult, CaseChange, CommandContext, CommandHandler, CommandMetadata};
