//! Service log ("bitácora") record
//!
//! The checklist held here is a [`ChecklistSnapshot`]: its step set is fixed
//! when the log is created and is never re-synchronised against later edits
//! to the catalog's [`ChecklistTemplate`].

use crate::models::ChecklistTemplate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One checklist step and its done flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub step: String,
    pub done: bool,
}

/// Checklist copied into a service log at creation time
///
/// Steps can be ticked but never added, removed or renamed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistSnapshot(Vec<ChecklistItem>);

impl ChecklistSnapshot {
    /// Copy a template, every step not done. Repeated step names collapse to one.
    pub fn from_template(template: &ChecklistTemplate) -> Self {
        let mut items: Vec<ChecklistItem> = Vec::with_capacity(template.steps().len());
        for step in template.steps() {
            if !items.iter().any(|i| &i.step == step) {
                items.push(ChecklistItem {
                    step: step.clone(),
                    done: false,
                });
            }
        }
        Self(items)
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, step: &str) -> bool {
        self.0.iter().any(|i| i.step == step)
    }

    pub fn is_done(&self, step: &str) -> Option<bool> {
        self.0.iter().find(|i| i.step == step).map(|i| i.done)
    }

    /// Flip one step, returning its new value, or `None` if the step is unknown
    pub fn toggle(&mut self, step: &str) -> Option<bool> {
        let item = self.0.iter_mut().find(|i| i.step == step)?;
        item.done = !item.done;
        Some(item.done)
    }

    pub fn complete_all(&mut self) {
        for item in &mut self.0 {
            item.done = true;
        }
    }

    pub fn done_count(&self) -> usize {
        self.0.iter().filter(|i| i.done).count()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|i| i.done)
    }
}

/// Spare part consumed during a service, priced at time of use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUsage {
    pub part_id: String,
    pub quantity: u32,
    pub unit_cost: Decimal,
}

/// Working record of one appointment's service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLog {
    pub appointment_id: String,
    pub service_id: String,
    /// Catalog base cost captured when the log was opened
    pub base_cost: Decimal,
    pub checklist: ChecklistSnapshot,
    #[serde(default)]
    pub parts_used: Vec<PartUsage>,
    /// Stored total, recomputed whenever parts change
    pub final_cost: Decimal,
    #[serde(default)]
    pub observations: String,
    pub created_at: i64,
    /// Set exactly once, when the log is locked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl ServiceLog {
    /// A log is locked once it has been finalized
    pub fn is_locked(&self) -> bool {
        self.completed_at.is_some()
    }
}
