use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use clinic_triage::{config::EngineConfig, core::engine::TriageEngine};

fn clinic(slots: u32, capacity: usize) -> TriageEngine {
    let mut engine = TriageEngine::with_config(EngineConfig {
        routine_capacity: capacity,
    });
    engine.add_doctor(1, "Dr. Bench", "General");
    for slot in 0..slots {
        engine
            .add_slot_to_doctor(1, slot, "09:00", "09:15")
            .expect("slot");
    }
    for id in 0..100u32 {
        engine.register_patient(id, format!("P{id}"), 40, (id % 101) as u8);
    }
    engine
}

fn bench_book_and_serve(c: &mut Criterion) {
    c.bench_function("book_serve_200", |b| {
        b.iter(|| {
            let mut engine = clinic(200, 200);
            for i in 0..200u32 {
                let _ = engine.book_routine(i % 100, 1).expect("book");
            }
            while engine.serve_next().is_ok() {}
        });
    });
}

fn bench_emergency_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("emergency_drain");
    for n in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut engine = clinic(0, 1);
                for i in 0..n {
                    let _ = engine
                        .emergency_in((i % 100) as u32, (i * 37 % 101) as u8)
                        .expect("emergency");
                }
                while engine.serve_next().is_ok() {}
            });
        });
    }
    group.finish();
}

fn bench_undo_bookings(c: &mut Criterion) {
    c.bench_function("undo_bookings_200", |b| {
        b.iter(|| {
            let mut engine = clinic(200, 200);
            for i in 0..200u32 {
                let _ = engine.book_routine(i % 100, 1).expect("book");
            }
            while engine.undo_last().is_ok() {}
        });
    });
}

criterion_group!(benches, bench_book_and_serve, bench_emergency_drain, bench_undo_bookings);
criterion_main!(benches);
