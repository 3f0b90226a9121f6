//! Service Catalog Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered list of verification steps defined by a catalog entry
///
/// Owned by the catalog and freely editable. A service log never holds a
/// template; it copies one into a [`crate::appointment::ChecklistSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistTemplate(Vec<String>);

impl ChecklistTemplate {
    pub fn new(steps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(steps.into_iter().map(Into::into).collect())
    }

    pub fn steps(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, step: impl Into<String>) {
        self.0.push(step.into());
    }
}

/// Service type entry (read-only from the core's point of view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_cost: Decimal,
    #[serde(default)]
    pub checklist_template: ChecklistTemplate,
    #[serde(default)]
    pub duration_minutes: u32,
}
