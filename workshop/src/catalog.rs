//! Catalog lookups - services and spare parts
//!
//! The catalog is owned elsewhere; this core only reads it. Prices and
//! checklist templates returned here are copied into a service log when it is
//! opened or when parts are first recorded, so later catalog edits never
//! change a stored log.

use dashmap::DashMap;
use shared::models::{ServiceCatalogEntry, SparePart};

use crate::core::WorkshopResult;
use crate::money::validate_cost;

/// Read access to the service and spare-part catalogs
pub trait CatalogLookup: Send + Sync {
    /// Service type by id
    fn service(&self, service_id: &str) -> Option<ServiceCatalogEntry>;

    /// Spare part by id, with its current unit cost
    fn spare_part(&self, part_id: &str) -> Option<SparePart>;
}

/// In-memory catalog
///
/// 使用 DashMap 实现无锁并发读写，目录更新不会阻塞命令处理。
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    services: DashMap<String, ServiceCatalogEntry>,
    spare_parts: DashMap<String, SparePart>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from lists, validating every cost
    pub fn with_entries(
        services: impl IntoIterator<Item = ServiceCatalogEntry>,
        spare_parts: impl IntoIterator<Item = SparePart>,
    ) -> WorkshopResult<Self> {
        let catalog = Self::new();
        for service in services {
            catalog.upsert_service(service)?;
        }
        for part in spare_parts {
            catalog.upsert_spare_part(part)?;
        }
        Ok(catalog)
    }

    /// Insert or replace a service; existing logs keep their snapshot
    pub fn upsert_service(&self, service: ServiceCatalogEntry) -> WorkshopResult<()> {
        validate_cost(service.base_cost, "base_cost")?;
        tracing::debug!(
            service_id = %service.id,
            steps = service.checklist_template.steps().len(),
            "Service upserted"
        );
        self.services.insert(service.id.clone(), service);
        Ok(())
    }

    /// Insert or replace a spare part; costs already recorded in logs are kept
    pub fn upsert_spare_part(&self, part: SparePart) -> WorkshopResult<()> {
        validate_cost(part.unit_cost, "unit_cost")?;
        tracing::debug!(part_id = %part.id, unit_cost = %part.unit_cost, "Spare part upserted");
        self.spare_parts.insert(part.id.clone(), part);
        Ok(())
    }

    pub fn remove_service(&self, service_id: &str) -> Option<ServiceCatalogEntry> {
        self.services.remove(service_id).map(|(_, v)| v)
    }

    pub fn remove_spare_part(&self, part_id: &str) -> Option<SparePart> {
        self.spare_parts.remove(part_id).map(|(_, v)| v)
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn spare_part_count(&self) -> usize {
        self.spare_parts.len()
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn service(&self, service_id: &str) -> Option<ServiceCatalogEntry> {
        self.services.get(service_id).map(|entry| entry.value().clone())
    }

    fn spare_part(&self, part_id: &str) -> Option<SparePart> {
        self.spare_parts.get(part_id).map(|entry| entry.value().clone())
    }
}
