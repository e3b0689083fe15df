//! In-memory registries, queues, and the triage engine that composes them.

/// Doctor registry keyed by doctor id.
pub mod doctors;
/// Min-severity emergency queue.
pub mod emergency;
/// Triage engine orchestrating registries, queues, and undo.
pub mod engine;
/// Patient registry keyed by patient id.
pub mod patients;
/// Bounded FIFO of routine tokens.
pub mod routine;
/// Undo log.
pub mod undo;
