//! Fixtures shared by the action tests

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::appointment::{Appointment, AppointmentStatus};
use shared::models::{Actor, BusinessHours, ChecklistTemplate, ServiceCatalogEntry, SparePart};

use crate::appointments::ServiceCase;
use crate::appointments::service_log;
use crate::appointments::traits::{CommandContext, CommandMetadata};
use crate::catalog::InMemoryCatalog;
use crate::storage::{AppointmentStore, InMemoryStore, WriteOp};

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn meta(actor: Actor) -> CommandMetadata {
    CommandMetadata {
        command_id: shared::util::new_id(),
        actor,
        timestamp: 1_000,
        expected_version: None,
    }
}

pub struct Fixture {
    pub store: InMemoryStore,
    pub catalog: InMemoryCatalog,
    pub hours: BusinessHours,
}

impl Fixture {
    /// Service `s1` (base 50, steps oil + brakes), parts P1 (10.00) and P2 (12.50)
    pub fn new() -> Self {
        let catalog = InMemoryCatalog::with_entries(
            [ServiceCatalogEntry {
                id: "s1".into(),
                name: "Inspection".into(),
                base_cost: Decimal::from(50),
                checklist_template: ChecklistTemplate::new(["oil", "brakes"]),
                duration_minutes: 60,
            }],
            [
                SparePart {
                    id: "P1".into(),
                    name: "Oil filter".into(),
                    unit_cost: Decimal::from(10),
                },
                SparePart {
                    id: "P2".into(),
                    name: "Brake pad".into(),
                    unit_cost: Decimal::new(1250, 2),
                },
            ],
        )
        .unwrap();
        Self {
            store: InMemoryStore::new(),
            catalog,
            hours: BusinessHours::default(),
        }
    }

    pub fn ctx(&self) -> CommandContext<'_> {
        CommandContext::new(&self.store, &self.catalog, self.hours.clone(), 30)
    }

    /// Store an appointment of client `c1` assigned to technician `t1`
    pub fn seed(&self, id: &str, vehicle_id: &str, status: AppointmentStatus) -> ServiceCase {
        self.seed_case(ServiceCase::new(Appointment {
            id: id.into(),
            client_id: "c1".into(),
            vehicle_id: vehicle_id.into(),
            service_id: "s1".into(),
            technician_id: Some("t1".into()),
            date: monday(),
            time: at(9, 0),
            status,
            notes: String::new(),
            created_at: 0,
            updated_at: 0,
        }))
    }

    /// Same as [`Fixture::seed`], with an open service log
    pub fn seed_with_log(&self, id: &str, status: AppointmentStatus) -> ServiceCase {
        let mut case = ServiceCase::new(Appointment {
            id: id.into(),
            client_id: "c1".into(),
            vehicle_id: format!("v-{id}"),
            service_id: "s1".into(),
            technician_id: Some("t1".into()),
            date: monday(),
            time: at(9, 0),
            status: AppointmentStatus::InProgress,
            notes: String::new(),
            created_at: 0,
            updated_at: 0,
        });
        service_log::create_or_load(&mut case, &self.catalog, 0).unwrap();
        if status == AppointmentStatus::Finalized {
            service_log::lock(case.service_log.as_mut().unwrap(), 1).unwrap();
        }
        case.appointment.status = status;
        self.seed_case(case)
    }

    fn seed_case(&self, case: ServiceCase) -> ServiceCase {
        let id = case.id().to_string();
        self.store
            .commit(&shared::util::new_id(), WriteOp::Insert(case), vec![])
            .unwrap();
        self.store.load(&id).unwrap()
    }
}
