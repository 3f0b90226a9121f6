//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use crate::core::{WorkshopError, WorkshopResult};

// ── Text length limits ──────────────────────────────────────────────

/// Opaque identifiers: appointment, client, vehicle, part, etc.
pub const MAX_ID_LEN: usize = 128;

/// Appointment notes
pub const MAX_NOTE_LEN: usize = 500;

/// Service log observations
pub const MAX_OBSERVATIONS_LEN: usize = 2000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> WorkshopResult<()> {
    if value.trim().is_empty() {
        return Err(WorkshopError::validation(format!("{field} must not be empty")));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string is within the length limit (empty allowed).
pub fn validate_text(value: &str, field: &str, max_len: usize) -> WorkshopResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(WorkshopError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> WorkshopResult<()> {
    match value {
        Some(v) => validate_text(v, field, max_len),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("v-1", "vehicle_id", MAX_ID_LEN).is_ok());
        assert!(validate_required_text("   ", "vehicle_id", MAX_ID_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(129), "vehicle_id", MAX_ID_LEN).is_err());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let notes = "ñ".repeat(MAX_NOTE_LEN);
        assert!(validate_text(&notes, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(notes + "a"), "notes", MAX_NOTE_LEN).is_err());
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
    }
}
