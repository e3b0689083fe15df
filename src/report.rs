//! Read-only snapshot of engine state.

use serde::{Deserialize, Serialize};

use crate::{
    doctor::Slot,
    types::DoctorId,
};

/// Per-doctor line of a [`TriageReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorReport {
    /// Doctor identifier.
    pub doctor_id: DoctorId,
    /// Doctor name.
    pub name: String,
    /// Specialization label.
    pub specialization: String,
    /// Slots currently held by outstanding routine tokens.
    pub booked_slots: usize,
    /// Slot the next routine booking would take.
    pub next_free: Option<Slot>,
}

/// Engine-wide counters plus one [`DoctorReport`] per doctor, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageReport {
    /// Per-doctor slot usage.
    pub doctors: Vec<DoctorReport>,
    /// Routine tokens waiting.
    pub routine_queue_len: usize,
    /// Emergency entries waiting.
    pub emergency_queue_len: usize,
    /// Registered patients.
    pub total_patients: usize,
}

impl std::fmt::Display for TriageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Reports ===")?;
        for d in &self.doctors {
            write!(
                f,
                "Doctor[id={},name={},spec={}] pendingBookedSlots={} nextFree=",
                d.doctor_id, d.name, d.specialization, d.booked_slots
            )?;
            match &d.next_free {
                Some(slot) => writeln!(f, "{slot}")?,
                None => writeln!(f, "none")?,
            }
        }
        writeln!(f, "Routine queue size: {}", self.routine_queue_len)?;
        writeln!(f, "Emergency queue size: {}", self.emergency_queue_len)?;
        write!(f, "Total registered patients: {}", self.total_patients)
    }
}
