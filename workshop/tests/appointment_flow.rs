//! End-to-end: a batch script driving one appointment from booking to finalization

use std::io::Write;

use shared::appointment::{AppointmentStatus, CommandErrorCode};
use shared::models::BusinessHours;
use workshop::Config;
use workshop::batch::{self, BatchScript};

const SCRIPT: &str = r#"{
    "business_hours": { "start": "08:00", "end": "17:00", "working_days": [1, 2, 3, 4, 5, 6] },
    "services": [
        { "id": "s1", "name": "Inspection", "base_cost": "50", "checklist_template": ["oil", "brakes"] }
    ],
    "spare_parts": [
        { "id": "P1", "name": "Oil filter", "unit_cost": "10" }
    ],
    "commands": [
        {
            "command_id": "book-sunday",
            "actor": { "id": "c1", "role": "CLIENT" },
            "payload": { "type": "CREATE_APPOINTMENT", "client_id": "c1", "vehicle_id": "V",
                         "service_id": "s1", "date": "2026-10-18", "time": "09:00" }
        },
        {
            "command_id": "book",
            "actor": { "id": "c1", "role": "CLIENT" },
            "payload": { "type": "CREATE_APPOINTMENT", "appointment_id": "A", "client_id": "c1",
                         "vehicle_id": "V", "service_id": "s1", "date": "2026-10-19", "time": "08:00" }
        },
        {
            "command_id": "book-again",
            "actor": { "id": "r1", "role": "RECEPTIONIST" },
            "payload": { "type": "CREATE_APPOINTMENT", "client_id": "c1", "vehicle_id": "V",
                         "service_id": "s1", "date": "2026-10-20", "time": "10:00" }
        },
        {
            "command_id": "assign",
            "actor": { "id": "r1", "role": "RECEPTIONIST" },
            "payload": { "type": "ASSIGN_TECHNICIAN", "appointment_id": "A", "technician_id": "t1" }
        },
        {
            "command_id": "confirm",
            "actor": { "id": "r1", "role": "RECEPTIONIST" },
            "payload": { "type": "CHANGE_STATUS", "appointment_id": "A", "status": "CONFIRMED" }
        },
        {
            "command_id": "client-cancel",
            "actor": { "id": "c1", "role": "CLIENT" },
            "payload": { "type": "CHANGE_STATUS", "appointment_id": "A", "status": "CANCELLED" }
        },
        {
            "command_id": "start",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "CHANGE_STATUS", "appointment_id": "A", "status": "IN_PROGRESS" }
        },
        {
            "command_id": "open-log",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "OPEN_SERVICE_LOG", "appointment_id": "A" }
        },
        {
            "command_id": "brakes",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "TOGGLE_CHECKLIST_STEP", "appointment_id": "A", "step": "brakes" }
        },
        {
            "command_id": "parts",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "SET_PARTS", "appointment_id": "A",
                         "parts": [{ "part_id": "P1", "quantity": 3 }] }
        },
        {
            "command_id": "finalize",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "FINALIZE_SERVICE", "appointment_id": "A" }
        },
        {
            "command_id": "late-toggle",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "TOGGLE_CHECKLIST_STEP", "appointment_id": "A", "step": "oil" }
        },
        {
            "command_id": "finalize",
            "actor": { "id": "t1", "role": "TECHNICIAN" },
            "payload": { "type": "FINALIZE_SERVICE", "appointment_id": "A" }
        },
        {
            "command_id": "rebook",
            "actor": { "id": "r1", "role": "RECEPTIONIST" },
            "payload": { "type": "CREATE_APPOINTMENT", "client_id": "c1", "vehicle_id": "V",
                         "service_id": "s1", "date": "2026-10-20", "time": "10:00" }
        }
    ]
}"#;

fn write_script(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_booking_to_finalization() {
    let file = write_script(SCRIPT);
    let script = BatchScript::load(file.path()).unwrap();
    let config = Config::with_business_hours(BusinessHours::default());
    let report = batch::run(script, &config).unwrap();

    let codes: Vec<(&str, Option<CommandErrorCode>)> = report
        .responses
        .iter()
        .map(|r| (r.command_id.as_str(), r.error_code()))
        .collect();
    assert_eq!(
        codes,
        [
            ("book-sunday", Some(CommandErrorCode::NonWorkingDay)),
            ("book", None),
            ("book-again", Some(CommandErrorCode::ActiveAppointmentConflict)),
            ("assign", None),
            ("confirm", None),
            ("client-cancel", Some(CommandErrorCode::InvalidTransition)),
            ("start", None),
            ("open-log", None),
            ("brakes", None),
            ("parts", None),
            ("finalize", None),
            ("late-toggle", Some(CommandErrorCode::InvalidState)),
            ("finalize", None),
            ("rebook", None),
        ]
    );

    // The repeated command id is answered as a duplicate, not re-run
    assert!(report.responses[12].duplicate);
    assert_eq!(report.responses[1].appointment_id.as_deref(), Some("A"));

    assert_eq!(report.status_summary[&AppointmentStatus::Finalized], 1);
    assert_eq!(report.status_summary[&AppointmentStatus::Pending], 1);
    assert_eq!(report.failed(), 4);
}

#[test]
fn test_responses_serialize_one_per_line() {
    let file = write_script(SCRIPT);
    let script = BatchScript::load(file.path()).unwrap();
    let config = Config::with_business_hours(BusinessHours::default());
    let report = batch::run(script, &config).unwrap();

    let first = serde_json::to_value(&report.responses[0]).unwrap();
    assert_eq!(first["success"], false);
    assert_eq!(first["error"]["code"], "NON_WORKING_DAY");

    let line = serde_json::to_string(&report.responses[1]).unwrap();
    assert!(!line.contains('\n'));
    assert!(line.contains("\"appointment_id\":\"A\""));
}

#[test]
fn test_missing_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = BatchScript::load(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
