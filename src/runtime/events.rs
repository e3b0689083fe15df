//! Runtime event stream payloads.

use crate::{
    op::UndoRecord,
    types::{DoctorId, PatientId, Severity, SlotId, TokenId, VisitKind},
};

/// Events emitted from the single-writer runtime loop after each successful
/// mutation, in command order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageEvent {
    /// A patient was inserted or overwritten.
    PatientRegistered {
        /// Patient id.
        patient_id: PatientId,
    },
    /// A patient was removed from the registry.
    PatientRemoved {
        /// Patient id.
        patient_id: PatientId,
    },
    /// A doctor was added or replaced.
    DoctorAdded {
        /// Doctor id.
        doctor_id: DoctorId,
    },
    /// A slot was added to a doctor.
    SlotAdded {
        /// Owning doctor.
        doctor_id: DoctorId,
        /// New slot.
        slot_id: SlotId,
    },
    /// A slot was cancelled.
    SlotCancelled {
        /// Owning doctor.
        doctor_id: DoctorId,
        /// Removed slot.
        slot_id: SlotId,
    },
    /// A routine token was queued.
    Booked {
        /// Issued token.
        token_id: TokenId,
        /// Patient booked.
        patient_id: PatientId,
    },
    /// A patient joined the emergency queue.
    EmergencyArrived {
        /// Patient id.
        patient_id: PatientId,
        /// Arrival severity.
        severity: Severity,
    },
    /// A token was served.
    Served {
        /// Served token.
        token_id: TokenId,
        /// Served patient.
        patient_id: PatientId,
        /// Queue the token came from.
        visit: VisitKind,
    },
    /// One undo record was popped.
    UndoApplied {
        /// The popped record.
        record: UndoRecord,
        /// True when state was actually reverted.
        reverted: bool,
    },
}
