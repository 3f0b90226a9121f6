//! Data models
//!
//! Catalog and configuration records the core reads but does not own.
//! All IDs are opaque strings.

pub mod actor;
pub mod business_hours;
pub mod service;
pub mod spare_part;

// Re-exports
pub use actor::*;
pub use business_hours::*;
pub use service::*;
pub use spare_part::*;
