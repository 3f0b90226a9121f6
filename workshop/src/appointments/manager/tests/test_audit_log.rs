use super::*;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::appointments::ServiceCase;
use crate::core::{WorkshopError, WorkshopResult};
use crate::storage::{Committed, WriteOp};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(self.0.clone())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with INFO-level JSON logs captured into the returned string
fn capture_logs(f: impl FnOnce()) -> String {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    sink.contents()
}

/// Store where another writer edits the notes just before the first update lands
struct RacingStore {
    inner: InMemoryStore,
    raced: AtomicBool,
}

impl RacingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            raced: AtomicBool::new(false),
        }
    }
}

impl AppointmentStore for RacingStore {
    fn load(&self, appointment_id: &str) -> Option<ServiceCase> {
        self.inner.load(appointment_id)
    }

    fn all(&self) -> Vec<ServiceCase> {
        self.inner.all()
    }

    fn appointments_for_vehicle(&self, vehicle_id: &str) -> Vec<Appointment> {
        self.inner.appointments_for_vehicle(vehicle_id)
    }

    fn is_processed(&self, command_id: &str) -> bool {
        self.inner.is_processed(command_id)
    }

    fn commit(
        &self,
        command_id: &str,
        op: WriteOp,
        events: Vec<AppointmentEvent>,
    ) -> WorkshopResult<Option<Committed>> {
        if let WriteOp::Update { case, .. } = &op
            && !self.raced.swap(true, Ordering::SeqCst)
        {
            let mut competing = self.inner.load(case.id()).unwrap();
            competing.appointment.notes = "Customer called ahead".into();
            let version = competing.version;
            self.inner
                .commit(
                    "competing-edit",
                    WriteOp::Update {
                        case: competing,
                        expected_version: version,
                    },
                    vec![],
                )
                .unwrap();
        }
        self.inner.commit(command_id, op, events)
    }

    fn events_since(&self, sequence: u64) -> Vec<AppointmentEvent> {
        self.inner.events_since(sequence)
    }

    fn current_sequence(&self) -> u64 {
        self.inner.current_sequence()
    }

    fn cleanup_command_ids(&self, processed_before: i64) -> usize {
        self.inner.cleanup_command_ids(processed_before)
    }
}

/// Store whose commits can be switched to fail
struct FailingStore {
    inner: InMemoryStore,
    failing: AtomicBool,
}

impl AppointmentStore for FailingStore {
    fn load(&self, appointment_id: &str) -> Option<ServiceCase> {
        self.inner.load(appointment_id)
    }

    fn all(&self) -> Vec<ServiceCase> {
        self.inner.all()
    }

    fn appointments_for_vehicle(&self, vehicle_id: &str) -> Vec<Appointment> {
        self.inner.appointments_for_vehicle(vehicle_id)
    }

    fn is_processed(&self, command_id: &str) -> bool {
        self.inner.is_processed(command_id)
    }

    fn commit(
        &self,
        command_id: &str,
        op: WriteOp,
        events: Vec<AppointmentEvent>,
    ) -> WorkshopResult<Option<Committed>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(WorkshopError::Internal("disk unavailable".into()));
        }
        self.inner.commit(command_id, op, events)
    }

    fn events_since(&self, sequence: u64) -> Vec<AppointmentEvent> {
        self.inner.events_since(sequence)
    }

    fn current_sequence(&self) -> u64 {
        self.inner.current_sequence()
    }

    fn cleanup_command_ids(&self, processed_before: i64) -> usize {
        self.inner.cleanup_command_ids(processed_before)
    }
}

#[test]
fn test_lost_race_logs_no_status_change() {
    let manager = create_test_manager_with_store(Arc::new(RacingStore::new()));
    let id = create_appointment(&manager, "v1");

    let mut resp = None;
    let logs = capture_logs(|| {
        resp = Some(change_status(
            &manager,
            staff(),
            &id,
            AppointmentStatus::Cancelled,
        ));
    });

    let resp = resp.unwrap();
    assert_eq!(resp.error_code(), Some(CommandErrorCode::StaleState));
    let case = manager.get_case(&id).unwrap();
    assert_eq!(case.status(), AppointmentStatus::Pending);
    assert_eq!(case.appointment.notes, "Customer called ahead");

    assert!(!logs.contains("Status changed"), "unexpected record: {logs}");
    assert!(logs.contains("Command rejected"));
}

#[test]
fn test_failed_commit_logs_no_change_record() {
    let store = Arc::new(FailingStore {
        inner: InMemoryStore::new(),
        failing: AtomicBool::new(false),
    });
    let manager = create_test_manager_with_store(store.clone());
    let in_service = start_service(&manager, "v1");
    let pending = create_appointment(&manager, "v2");
    store.failing.store(true, Ordering::SeqCst);

    let logs = capture_logs(|| {
        let responses = [
            change_status(&manager, staff(), &pending, AppointmentStatus::Confirmed),
            manager.execute_command(cmd(
                staff(),
                AppointmentCommandPayload::AssignTechnician {
                    appointment_id: pending.clone(),
                    technician_id: "t2".into(),
                },
            )),
            manager.execute_command(cmd(
                Actor::technician("t1"),
                AppointmentCommandPayload::FinalizeService {
                    appointment_id: in_service.clone(),
                },
            )),
            manager.execute_command(cmd(
                admin(),
                AppointmentCommandPayload::DeleteAppointment {
                    appointment_id: pending.clone(),
                },
            )),
        ];
        for resp in responses {
            assert_eq!(resp.error_code(), Some(CommandErrorCode::InternalError));
        }
    });

    for record in [
        "Status changed",
        "Technician assigned",
        "Service finalized",
        "Appointment deleted",
    ] {
        assert!(!logs.contains(record), "unexpected {record:?} in {logs}");
    }
    assert_eq!(
        manager.get_case(&in_service).unwrap().status(),
        AppointmentStatus::InProgress
    );
    assert!(manager.get_case(&pending).is_some());
}

#[test]
fn test_committed_change_is_audited_once() {
    let manager = create_test_manager();
    let id = start_service(&manager, "v1");

    let logs = capture_logs(|| {
        let resp = manager.execute_command(cmd(
            Actor::technician("t1"),
            AppointmentCommandPayload::FinalizeService {
                appointment_id: id.clone(),
            },
        ));
        assert!(resp.success, "{:?}", resp.error);
    });

    let audit_target = format!("\"target\":\"{}\"", crate::utils::logger::AUDIT_TARGET);
    let audit_lines: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains(&audit_target))
        .collect();
    assert!(
        audit_lines
            .iter()
            .any(|line| line.contains("Status changed")),
        "{logs}"
    );
    assert_eq!(
        audit_lines
            .iter()
            .filter(|line| line.contains("Service finalized"))
            .count(),
        1,
        "{logs}"
    );
}
