//! Shared primitive IDs and triage enums.

use serde::{Deserialize, Serialize};

/// Caller-supplied patient identifier.
pub type PatientId = u32;
/// Caller-supplied doctor identifier.
pub type DoctorId = u32;
/// Slot identifier, unique within its owning doctor.
pub type SlotId = u32;
/// Monotonic token identifier.
pub type TokenId = u64;
/// Triage severity; lower is more critical. Nominal range is 0-100.
pub type Severity = u8;

/// Default capacity of the routine FIFO.
pub const DEFAULT_ROUTINE_CAPACITY: usize = 200;

/// Which queue discipline issued a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitKind {
    /// Slot-backed scheduled visit, served in booking order.
    Routine,
    /// Priority arrival, served by severity.
    Emergency,
}

impl std::fmt::Display for VisitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitKind::Routine => write!(f, "ROUTINE"),
            VisitKind::Emergency => write!(f, "EMERGENCY"),
        }
    }
}
