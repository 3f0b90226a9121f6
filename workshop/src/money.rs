//! Money calculation utilities using rust_decimal for precision
//!
//! Totals are computed once, when the parts list or base cost changes, and
//! the result is stored in the service log. Reads never recompute.

use rust_decimal::prelude::*;
use shared::appointment::{PartUsage, PartUsageInput};

use crate::core::{WorkshopError, WorkshopResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed amount for a single cost (1,000,000.00)
pub const MAX_COST: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

/// Maximum allowed quantity per part line
pub const MAX_QUANTITY: u32 = 9999;

/// Round to 2 decimal places, half away from zero, keeping two digits of scale
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// unit_cost × quantity, unrounded
#[inline]
pub fn line_total(part: &PartUsage) -> Decimal {
    part.unit_cost * Decimal::from(part.quantity)
}

/// total = base_cost + Σ(unit_cost × quantity), rounded half-up to 2 places
pub fn compute_total(base_cost: Decimal, parts: &[PartUsage]) -> Decimal {
    let parts_total: Decimal = parts.iter().map(line_total).sum();
    round_money(base_cost + parts_total)
}

/// A cost must be non-negative and within [`MAX_COST`]
pub fn validate_cost(value: Decimal, field_name: &str) -> WorkshopResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(WorkshopError::InvalidAmount(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_COST {
        return Err(WorkshopError::InvalidAmount(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_COST, value
        )));
    }
    Ok(())
}

/// Quantity must be at least 1 and at most [`MAX_QUANTITY`]
pub fn validate_quantity(part_id: &str, quantity: u32) -> WorkshopResult<()> {
    if quantity == 0 {
        return Err(WorkshopError::InvalidQuantity(format!(
            "quantity for part {} must be at least 1",
            part_id
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(WorkshopError::InvalidQuantity(format!(
            "quantity for part {} exceeds maximum allowed ({}), got {}",
            part_id, MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a requested parts list before it is priced
pub fn validate_parts(parts: &[PartUsageInput]) -> WorkshopResult<()> {
    for part in parts {
        if part.part_id.trim().is_empty() {
            return Err(WorkshopError::validation("part_id must not be empty"));
        }
        validate_quantity(&part.part_id, part.quantity)?;
    }
    Ok(())
}

/// Check that a stored total still matches its inputs
pub fn verify_total(base_cost: Decimal, parts: &[PartUsage], stored: Decimal) -> bool {
    compute_total(base_cost, parts) == stored
}
