use clinic_triage::{
    config::EngineConfig,
    core::engine::TriageEngine,
    error::{ErrorKind, TriageError},
    token::TokenKind,
    types::VisitKind,
};

fn clinic() -> TriageEngine {
    let mut engine = TriageEngine::new();
    engine.register_patient(1, "Asha", 30, 20);
    engine.add_doctor(1, "Dr. X", "Gen");
    engine
        .add_slot_to_doctor(1, 101, "09:00", "09:15")
        .expect("slot");
    engine
}

#[test]
fn book_serve_then_nothing_left() {
    let mut engine = clinic();

    let token = engine.book_routine(1, 1).expect("book");
    assert_eq!(token.id, 1);
    assert_eq!(
        token.kind,
        TokenKind::Routine {
            doctor_id: 1,
            slot_id: 101
        }
    );
    assert!(engine.doctor(1).unwrap().slots.get(101).unwrap().is_booked());
    assert_eq!(engine.routine_len(), 1);

    let served = engine.serve_next().expect("serve");
    assert_eq!(served.token, token);
    assert!(served.slot_freed);
    assert_eq!(served.patient.as_ref().map(|p| p.name.as_str()), Some("Asha"));
    assert!(!engine.doctor(1).unwrap().slots.get(101).unwrap().is_booked());

    let err = engine.serve_next().unwrap_err();
    assert_eq!(err, TriageError::NothingToServe);
    assert_eq!(err.kind(), ErrorKind::EmptyQueue);
    // book + serve; the failed serve pushes nothing
    assert_eq!(engine.undo_len(), 2);
}

#[test]
fn emergencies_served_by_ascending_severity() {
    let mut engine = TriageEngine::new();
    for (id, name) in [(1, "A"), (2, "B"), (3, "C")] {
        engine.register_patient(id, name, 40, 50);
    }
    engine.emergency_in(1, 50).unwrap();
    engine.emergency_in(2, 10).unwrap();
    engine.emergency_in(3, 30).unwrap();

    let order: Vec<_> = (0..3)
        .map(|_| engine.serve_next().expect("serve").token.kind)
        .collect();
    assert_eq!(
        order,
        vec![
            TokenKind::Emergency { severity: 10 },
            TokenKind::Emergency { severity: 30 },
            TokenKind::Emergency { severity: 50 },
        ]
    );
    assert_eq!(engine.emergency_len(), 0);
}

#[test]
fn equal_severity_served_in_arrival_order() {
    let mut engine = TriageEngine::new();
    for id in 1..=4 {
        engine.register_patient(id, format!("P{id}"), 20, 15);
    }
    for id in [3, 1, 4, 2] {
        engine.emergency_in(id, 15).unwrap();
    }

    let served: Vec<_> = (0..4)
        .map(|_| engine.serve_next().unwrap().token.patient_id)
        .collect();
    assert_eq!(served, vec![3, 1, 4, 2]);
}

#[test]
fn emergency_preempts_routine_and_token_ids_keep_rising() {
    let mut engine = clinic();
    engine
        .add_slot_to_doctor(1, 102, "09:15", "09:30")
        .unwrap();
    engine.register_patient(2, "Bo", 70, 5);

    let t1 = engine.book_routine(1, 1).unwrap();
    engine.emergency_in(2, 5).unwrap();
    let s1 = engine.serve_next().unwrap();
    let t3 = engine.book_routine(1, 1).unwrap();
    let s2 = engine.serve_next().unwrap();

    assert_eq!(s1.token.visit(), VisitKind::Emergency);
    assert_eq!(s1.token.patient_id, 2);
    assert!(!s1.slot_freed);
    assert_eq!(s1.token.doctor_id(), None);
    assert_eq!(s1.token.slot_id(), None);
    assert_eq!((t1.id, s1.token.id, t3.id), (1, 2, 3));
    assert_eq!(s2.token, t1);
    assert_eq!(engine.peek_next_token_id(), 4);
}

#[test]
fn next_free_prefers_most_recently_added_slot() {
    let mut engine = clinic();
    engine.add_slot_to_doctor(1, 102, "09:15", "09:30").unwrap();
    engine.add_slot_to_doctor(1, 103, "09:30", "09:45").unwrap();

    assert_eq!(engine.find_next_free(1).unwrap().map(|s| s.id), Some(103));

    let booked: Vec<_> = (0..3)
        .map(|_| engine.book_routine(1, 1).unwrap().slot_id())
        .collect();
    assert_eq!(booked, vec![Some(103), Some(102), Some(101)]);

    let err = engine.book_routine(1, 1).unwrap_err();
    assert_eq!(err, TriageError::NoFreeSlot(1));
    assert_eq!(engine.find_next_free(1).unwrap(), None);
}

#[test]
fn booking_requires_patient_and_doctor() {
    let mut engine = clinic();

    let err = engine.book_routine(9, 1).unwrap_err();
    assert_eq!(
        err,
        TriageError::PatientOrDoctorMissing {
            patient_id: 9,
            doctor_id: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(engine.book_routine(1, 9).is_err());
    assert!(matches!(
        engine.emergency_in(9, 1),
        Err(TriageError::PatientNotFound(9))
    ));
    assert!(matches!(
        engine.add_slot_to_doctor(9, 1, "a", "b"),
        Err(TriageError::DoctorNotFound(9))
    ));
    assert_eq!(engine.undo_len(), 0);
    assert_eq!(engine.peek_next_token_id(), 1);
}

#[test]
fn full_routine_queue_rolls_back_slot() {
    let mut engine = TriageEngine::new();
    engine.register_patient(1, "Asha", 30, 20);
    engine.add_doctor(1, "Dr. X", "Gen");
    for slot in 1..=201 {
        engine
            .add_slot_to_doctor(1, slot, "t0", "t1")
            .unwrap();
    }

    for _ in 0..200 {
        engine.book_routine(1, 1).expect("within capacity");
    }
    assert_eq!(engine.routine_len(), 200);

    let err = engine.book_routine(1, 1).unwrap_err();
    assert_eq!(err, TriageError::RoutineQueueFull { capacity: 200 });
    assert_eq!(err.kind(), ErrorKind::Capacity);

    let candidate = engine.find_next_free(1).unwrap().expect("slot left free");
    assert_eq!(candidate.id, 1);
    assert!(!candidate.is_booked());
    assert_eq!(engine.routine_len(), 200);
    assert_eq!(engine.undo_len(), 200);
}

#[test]
fn configured_capacity_is_honoured() {
    let mut engine = TriageEngine::with_config(EngineConfig {
        routine_capacity: 1,
    });
    engine.register_patient(1, "Asha", 30, 20);
    engine.add_doctor(1, "Dr. X", "Gen");
    engine.add_slot_to_doctor(1, 1, "a", "b").unwrap();
    engine.add_slot_to_doctor(1, 2, "b", "c").unwrap();

    engine.book_routine(1, 1).unwrap();
    assert!(matches!(
        engine.book_routine(1, 1),
        Err(TriageError::RoutineQueueFull { capacity: 1 })
    ));
    assert_eq!(engine.report().doctors[0].booked_slots, 1);

    let zero = TriageEngine::with_config(EngineConfig {
        routine_capacity: 0,
    });
    assert_eq!(zero.routine_capacity(), 1);
}

#[test]
fn re_adding_doctor_replaces_it_and_drops_slots() {
    let mut engine = clinic();
    let replaced = engine.add_doctor(1, "Dr. Y", "Cardio");

    assert_eq!(replaced.name, "Dr. Y");
    let doctor = engine.doctor(1).unwrap();
    assert_eq!(doctor.specialization, "Cardio");
    assert!(doctor.slots.is_empty());
    assert_eq!(engine.book_routine(1, 1), Err(TriageError::NoFreeSlot(1)));
}

#[test]
fn register_patient_overwrites_fields() {
    let mut engine = clinic();
    engine.register_patient(1, "Asha K", 31, 12);

    let p = engine.patient(1).unwrap();
    assert_eq!((p.name.as_str(), p.age, p.severity), ("Asha K", 31, 12));
    assert_eq!(engine.patients().len(), 1);
}

#[test]
fn removed_patient_still_served_without_record() {
    let mut engine = clinic();
    let token = engine.book_routine(1, 1).unwrap();

    assert!(engine.remove_patient(1));
    assert!(!engine.remove_patient(1));

    let served = engine.serve_next().unwrap();
    assert_eq!(served.token, token);
    assert_eq!(served.patient, None);
}

#[test]
fn cancelled_slot_is_not_freed_on_serve() {
    let mut engine = clinic();
    engine.book_routine(1, 1).unwrap();

    assert_eq!(engine.cancel_slot(1, 101), Ok(true));
    assert_eq!(engine.cancel_slot(1, 101), Ok(false));
    assert_eq!(engine.cancel_slot(5, 101), Err(TriageError::DoctorNotFound(5)));

    let served = engine.serve_next().unwrap();
    assert!(!served.slot_freed);
    assert!(engine.doctor(1).unwrap().slots.is_empty());
}

#[test]
fn stale_token_does_not_free_readded_slot() {
    let mut engine = clinic();
    engine.register_patient(2, "Bo", 70, 5);
    let first = engine.book_routine(1, 1).unwrap();
    assert_eq!(first.slot_id(), Some(101));

    assert_eq!(engine.cancel_slot(1, 101), Ok(true));
    engine.add_slot_to_doctor(1, 101, "09:00", "09:15").unwrap();
    let second = engine.book_routine(2, 1).unwrap();
    assert_eq!(second.slot_id(), Some(101));

    let served = engine.serve_next().unwrap();
    assert_eq!(served.token, first);
    assert!(!served.slot_freed);

    let slot = engine.doctor(1).unwrap().slots.get(101).unwrap();
    assert_eq!(slot.booked_by, Some(second.id));
    assert_eq!(engine.book_routine(1, 1), Err(TriageError::NoFreeSlot(1)));

    let served = engine.serve_next().unwrap();
    assert_eq!(served.token, second);
    assert!(served.slot_freed);
}

#[test]
fn report_counts_everything() {
    let mut engine = TriageEngine::new();
    engine.seed_demo().unwrap();
    engine.add_doctor(2, "Dr. Lee", "Peds");
    engine.register_patient(1, "Asha", 30, 20);
    engine.register_patient(2, "Bo", 70, 5);
    engine.book_routine(1, 1).unwrap();
    engine.emergency_in(2, 5).unwrap();

    let report = engine.report();
    assert_eq!(report.routine_queue_len, 1);
    assert_eq!(report.emergency_queue_len, 1);
    assert_eq!(report.total_patients, 2);

    let ids: Vec<_> = report.doctors.iter().map(|d| d.doctor_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(report.doctors[0].booked_slots, 1);
    assert_eq!(report.doctors[0].next_free.as_ref().map(|s| s.id), Some(101));
    assert_eq!(report.doctors[1].next_free, None);

    let text = report.to_string();
    assert!(text.contains("Routine queue size: 1"));
    assert!(text.contains("nextFree=none"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total_patients"], 2);
}
