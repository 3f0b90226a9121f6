//! Batch runner - replays a JSON script of commands against an in-memory core
//!
//! Script format:
//!
//! ```json
//! {
//!   "business_hours": { "start": "08:00", "end": "17:00", "working_days": [1,2,3,4,5,6] },
//!   "services": [{ "id": "s1", "base_cost": "50", "checklist_template": ["oil", "brakes"] }],
//!   "spare_parts": [{ "id": "P1", "unit_cost": "10" }],
//!   "commands": [{
//!     "actor": { "id": "r1", "role": "RECEPTIONIST" },
//!     "payload": { "type": "OPEN_SERVICE_LOG", "appointment_id": "a1" }
//!   }]
//! }
//! ```
//!
//! `business_hours` is optional and overrides the configured hours.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::appointment::{AppointmentCommand, AppointmentStatus, CommandResponse};
use shared::models::{BusinessHours, ServiceCatalogEntry, SparePart};

use crate::appointments::WorkshopManager;
use crate::catalog::InMemoryCatalog;
use crate::core::Config;
use crate::storage::InMemoryStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchScript {
    #[serde(default)]
    pub business_hours: Option<BusinessHours>,
    #[serde(default)]
    pub services: Vec<ServiceCatalogEntry>,
    #[serde(default)]
    pub spare_parts: Vec<SparePart>,
    #[serde(default)]
    pub commands: Vec<AppointmentCommand>,
}

impl BatchScript {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One response per command, in script order
    pub responses: Vec<CommandResponse>,
    pub status_summary: BTreeMap<AppointmentStatus, usize>,
    pub last_sequence: u64,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.responses.iter().filter(|r| !r.success).count()
    }
}

/// Execute every command of `script` in order; rejections do not stop the run
pub fn run(script: BatchScript, config: &Config) -> anyhow::Result<BatchReport> {
    let catalog = InMemoryCatalog::with_entries(script.services, script.spare_parts)
        .context("invalid catalog in script")?;
    let mut config = config.clone();
    if let Some(business_hours) = script.business_hours {
        config.business_hours = business_hours;
    }

    let manager =
        WorkshopManager::from_config(&config, Arc::new(InMemoryStore::new()), Arc::new(catalog))
            .context("invalid business hours")?;

    tracing::info!(command_count = script.commands.len(), "Running batch");

    let responses: Vec<CommandResponse> = script
        .commands
        .into_iter()
        .map(|cmd| manager.execute_command(cmd))
        .collect();

    let report = BatchReport {
        responses,
        status_summary: manager.status_summary(),
        last_sequence: manager.current_sequence(),
    };
    tracing::info!(
        failed = report.failed(),
        last_sequence = report.last_sequence,
        "Batch finished"
    );
    Ok(report)
}
