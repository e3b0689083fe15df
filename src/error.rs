//! Engine error type and its coarse classification.

use thiserror::Error;

use crate::{
    op::UndoRecord,
    types::{DoctorId, PatientId},
};

/// Coarse failure class reported alongside every [`TriageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A patient, doctor, slot, or token was absent.
    NotFound,
    /// The routine queue is full.
    Capacity,
    /// Nothing to serve or undo.
    EmptyQueue,
    /// The undo record cannot be reversed.
    Unsupported,
}

/// Failure of a single engine call. None of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    /// No patient registered under this id.
    #[error("patient {0} not found")]
    PatientNotFound(PatientId),

    /// No doctor registered under this id.
    #[error("doctor {0} not found")]
    DoctorNotFound(DoctorId),

    /// A booking referenced a patient or doctor that does not exist.
    #[error("patient {patient_id} or doctor {doctor_id} missing")]
    PatientOrDoctorMissing {
        /// Requested patient.
        patient_id: PatientId,
        /// Requested doctor.
        doctor_id: DoctorId,
    },

    /// Every slot of the doctor is booked.
    #[error("no free slot for doctor {0}")]
    NoFreeSlot(DoctorId),

    /// The routine queue is at capacity; the booking was rolled back.
    #[error("routine queue full (capacity {capacity}), booking failed")]
    RoutineQueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },

    /// Both queues are empty.
    #[error("no patients to serve")]
    NothingToServe,

    /// The undo log is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The popped record is not reversible; it has been discarded.
    #[error("undo of {} action is not supported and needs manual verification", .0.label())]
    UndoUnsupported(UndoRecord),
}

impl TriageError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TriageError::PatientNotFound(_)
            | TriageError::DoctorNotFound(_)
            | TriageError::PatientOrDoctorMissing { .. }
            | TriageError::NoFreeSlot(_) => ErrorKind::NotFound,
            TriageError::RoutineQueueFull { .. } => ErrorKind::Capacity,
            TriageError::NothingToServe | TriageError::NothingToUndo => ErrorKind::EmptyQueue,
            TriageError::UndoUnsupported(_) => ErrorKind::Unsupported,
        }
    }
}

/// Result alias used across the engine.
pub type TriageResult<T> = Result<T, TriageError>;
