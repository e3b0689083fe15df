use clinic_triage::{
    config::EngineConfig,
    core::engine::TriageEngine,
    error::TriageError,
    runtime::handle::{spawn_triage, RuntimeConfig, RuntimeError, TriageHandle},
    shell::{parse, ShellCommand as Cmd, HELP},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut engine = TriageEngine::with_config(EngineConfig::from_env());
    if let Err(err) = engine.seed_demo() {
        eprintln!("demo roster not installed: {err}");
    }
    let handle = spawn_triage(engine, RuntimeConfig::default());

    println!("Hospital Triage System - CLI");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse(&line) {
            Ok(Cmd::Exit) => break,
            Ok(cmd) => {
                if let Err(err) = run(&handle, cmd).await {
                    match err {
                        RuntimeError::Triage(e) => println!("{}", status(&e)),
                        RuntimeError::ChannelClosed => {
                            eprintln!("engine stopped");
                            break;
                        }
                    }
                }
            }
            Err(msg) => println!("{msg}"),
        }
    }

    let _ = handle.shutdown().await;
    info!("shell exited");
    println!("Exit.");
}

async fn run(handle: &TriageHandle, cmd: Cmd) -> Result<(), RuntimeError> {
    match cmd {
        Cmd::Patient {
            id,
            name,
            age,
            severity,
        } => {
            let p = handle.register_patient(id, name, age, severity).await?;
            println!("Patient registered: {p}");
        }
        Cmd::Doctor {
            id,
            name,
            specialization,
        } => {
            let d = handle.add_doctor(id, name, specialization).await?;
            println!("Added doctor: {d}");
        }
        Cmd::Slot {
            doctor_id,
            slot_id,
            start,
            end,
        } => {
            let s = handle.add_slot_to_doctor(doctor_id, slot_id, start, end).await?;
            println!("Slot added to doctor {doctor_id}: {s}");
        }
        Cmd::Book {
            patient_id,
            doctor_id,
        } => {
            let t = handle.book_routine(patient_id, doctor_id).await?;
            println!("Booked routine token: {t}");
        }
        Cmd::Emergency {
            patient_id,
            severity,
        } => {
            handle.emergency_in(patient_id, severity).await?;
            println!("Emergency inserted: pid={patient_id} severity={severity}");
        }
        Cmd::Serve => {
            let served = handle.serve_next().await?;
            let who = served
                .patient
                .map(|p| p.to_string())
                .unwrap_or_else(|| {
                    format!("pid={} (no longer registered)", served.token.patient_id)
                });
            println!("Served {}: {} {who}", served.token.visit(), served.token);
        }
        Cmd::Undo => {
            let r = handle.undo_last().await?;
            println!("Undo booking: token {} removed? {}", r.token.id, r.removed);
        }
        Cmd::Report { json } => {
            let report = handle.report().await?;
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(s) => println!("{s}"),
                    Err(err) => eprintln!("report encoding failed: {err}"),
                }
            } else {
                println!("{report}");
            }
        }
        Cmd::Help => println!("{HELP}"),
        Cmd::Exit => {}
    }
    Ok(())
}

fn status(err: &TriageError) -> String {
    match err {
        TriageError::NothingToServe => "No patients to serve.".to_string(),
        TriageError::NothingToUndo => "Nothing to undo.".to_string(),
        other => format!("{other} ({:?})", other.kind()),
    }
}
