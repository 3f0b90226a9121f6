//! Scheduling rules: bookable slots and admission checks

pub mod guard;
pub mod time_slots;

pub use guard::{can_create, validate_slot};
pub use time_slots::{
    DEFAULT_SLOT_STEP_MINUTES, generate_slots, is_slot, is_working_day, slots_for,
    validate_business_hours,
};
