use std::time::Duration;

use clinic_triage::{
    core::engine::TriageEngine,
    error::TriageError,
    op::UndoRecord,
    runtime::{
        events::TriageEvent,
        handle::{spawn_triage, RuntimeConfig, RuntimeError},
    },
    types::VisitKind,
};

async fn next_event(sub: &mut tokio::sync::broadcast::Receiver<TriageEvent>) -> TriageEvent {
    tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv")
}

#[tokio::test]
async fn runtime_book_serve_and_events_ordered() {
    let handle = spawn_triage(TriageEngine::new(), RuntimeConfig::default());
    let mut sub = handle.subscribe();

    handle.register_patient(1, "Asha", 30, 20).await.expect("register");
    handle.add_doctor(1, "Dr. X", "Gen").await.expect("doctor");
    handle
        .add_slot_to_doctor(1, 101, "09:00", "09:15")
        .await
        .expect("slot");
    let token = handle.book_routine(1, 1).await.expect("book");
    let served = handle.serve_next().await.expect("serve");
    assert_eq!(served.token, token);

    let expected = [
        TriageEvent::PatientRegistered { patient_id: 1 },
        TriageEvent::DoctorAdded { doctor_id: 1 },
        TriageEvent::SlotAdded {
            doctor_id: 1,
            slot_id: 101,
        },
        TriageEvent::Booked {
            token_id: 1,
            patient_id: 1,
        },
        TriageEvent::Served {
            token_id: 1,
            patient_id: 1,
            visit: VisitKind::Routine,
        },
    ];
    for want in expected {
        assert_eq!(next_event(&mut sub).await, want);
    }

    let report = handle.report().await.expect("report");
    assert_eq!(report.routine_queue_len, 0);
    assert_eq!(report.doctors[0].booked_slots, 0);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_surfaces_engine_errors_and_undo_events() {
    let handle = spawn_triage(TriageEngine::new(), RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let err = handle.serve_next().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Triage(TriageError::NothingToServe)));
    let err = handle.emergency_in(5, 1).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Triage(TriageError::PatientNotFound(5))));

    handle.register_patient(5, "Eve", 61, 2).await.unwrap();
    handle.emergency_in(5, 2).await.unwrap();
    let err = handle.undo_last().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Triage(TriageError::UndoUnsupported(
            UndoRecord::EmergencyInsert { patient_id: 5 }
        ))
    ));

    assert_eq!(next_event(&mut sub).await, TriageEvent::PatientRegistered { patient_id: 5 });
    assert_eq!(
        next_event(&mut sub).await,
        TriageEvent::EmergencyArrived {
            patient_id: 5,
            severity: 2
        }
    );
    assert_eq!(
        next_event(&mut sub).await,
        TriageEvent::UndoApplied {
            record: UndoRecord::EmergencyInsert { patient_id: 5 },
            reverted: false
        }
    );

    assert_eq!(handle.patient(5).await.unwrap().map(|p| p.age), Some(61));
    assert!(handle.remove_patient(5).await.unwrap());
    assert_eq!(handle.patient(5).await.unwrap(), None);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn calls_after_shutdown_fail_with_channel_closed() {
    let handle = spawn_triage(TriageEngine::new(), RuntimeConfig::default());
    let clone = handle.clone();
    handle.shutdown().await.expect("shutdown");

    let err = clone.report().await.unwrap_err();
    assert!(matches!(err, RuntimeError::ChannelClosed));
}
