use super::*;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::appointment::{AppointmentCommandPayload, CommandErrorCode, PartUsageInput};
use shared::models::{ChecklistTemplate, ServiceCatalogEntry, SparePart};

use crate::catalog::InMemoryCatalog;
use crate::storage::{AppointmentStore, InMemoryStore};

mod test_audit_log;

fn create_test_manager() -> WorkshopManager {
    create_test_manager_with_store(Arc::new(InMemoryStore::new()))
}

fn create_test_manager_with_store(store: Arc<dyn AppointmentStore>) -> WorkshopManager {
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
    WorkshopManager::new(
        store,
        Arc::new(catalog),
        BusinessHours::default(),
        30,
    )
    .unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn staff() -> Actor {
    Actor::receptionist("r1")
}

fn admin() -> Actor {
    Actor::administrator("a1")
}

fn cmd(actor: Actor, payload: AppointmentCommandPayload) -> AppointmentCommand {
    AppointmentCommand::new(actor, payload)
}

fn create_payload(
    vehicle_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> AppointmentCommandPayload {
    AppointmentCommandPayload::CreateAppointment {
        appointment_id: None,
        client_id: "c1".into(),
        vehicle_id: vehicle_id.into(),
        service_id: "s1".into(),
        technician_id: Some("t1".into()),
        date,
        time,
        notes: None,
    }
}

// ========================================================================
// Helper: create a Monday 09:00 appointment for client c1 / technician t1
// ========================================================================

fn create_appointment(manager: &WorkshopManager, vehicle_id: &str) -> String {
    let resp =
        manager.execute_command(cmd(staff(), create_payload(vehicle_id, monday(), at(9, 0))));
    assert!(resp.success, "Failed to create appointment: {:?}", resp.error);
    resp.appointment_id.unwrap()
}

fn change_status(
    manager: &WorkshopManager,
    actor: Actor,
    appointment_id: &str,
    status: AppointmentStatus,
) -> CommandResponse {
    manager.execute_command(cmd(
        actor,
        AppointmentCommandPayload::ChangeStatus {
            appointment_id: appointment_id.into(),
            status,
        },
    ))
}

/// Appointment in progress with an open service log
fn start_service(manager: &WorkshopManager, vehicle_id: &str) -> String {
    let id = create_appointment(manager, vehicle_id);
    let resp = change_status(
        manager,
        Actor::technician("t1"),
        &id,
        AppointmentStatus::InProgress,
    );
    assert!(resp.success, "Failed to start service: {:?}", resp.error);
    let resp = manager.execute_command(cmd(
        Actor::technician("t1"),
        AppointmentCommandPayload::OpenServiceLog {
            appointment_id: id.clone(),
        },
    ));
    assert!(resp.success, "Failed to open log: {:?}", resp.error);
    id
}

fn part(part_id: &str, quantity: u32) -> PartUsageInput {
    PartUsageInput {
        part_id: part_id.into(),
        quantity,
    }
}
