//! Spare Part Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spare part catalog entry; `unit_cost` is read at time of use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub unit_cost: Decimal,
}
