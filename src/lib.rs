//! Single-process clinic triage engine.
//!
//! Tracks patients, doctors, and bookable slots, and serves two classes of
//! demand: slot-backed routine visits in booking order, and emergency
//! arrivals by severity (lower is more critical). Emergencies always go
//! first. Routine bookings can be undone.
//!
//! # Examples
//!
//! Synchronous usage with [`core::engine::TriageEngine`]:
//! ```
//! use clinic_triage::core::engine::TriageEngine;
//!
//! let mut engine = TriageEngine::new();
//! engine.register_patient(1, "Asha", 30, 20);
//! engine.add_doctor(1, "Dr. X", "Gen");
//! engine.add_slot_to_doctor(1, 101, "09:00", "09:15").expect("slot");
//!
//! let token = engine.book_routine(1, 1).expect("book");
//! assert_eq!(token.id, 1);
//!
//! let served = engine.serve_next().expect("serve");
//! assert_eq!(served.token, token);
//! assert!(engine.serve_next().is_err());
//! ```
//!
//! Runtime usage behind a single-writer task:
//! ```no_run
//! use clinic_triage::{
//!     core::engine::TriageEngine,
//!     runtime::handle::{spawn_triage, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_triage(TriageEngine::new(), RuntimeConfig::default());
//! handle.register_patient(7, "Ravi", 54, 10).await.expect("register");
//! handle.emergency_in(7, 5).await.expect("emergency");
//! let served = handle.serve_next().await.expect("serve");
//! assert_eq!(served.token.patient_id, 7);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// Engine configuration.
pub mod config;
/// Registries, queues, undo log, and the triage engine.
pub mod core;
/// Doctor and slot records.
pub mod doctor;
/// Engine error type.
pub mod error;
/// Undo record model.
pub mod op;
/// Patient record.
pub mod patient;
/// Read-only state reports.
pub mod report;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Line parser for the interactive shell.
pub mod shell;
/// Service tokens.
pub mod token;
/// Shared primitive types and enums.
pub mod types;
