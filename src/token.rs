//! Service tokens handed out for routine bookings and emergency serves.

use serde::{Deserialize, Serialize};

use crate::types::{DoctorId, PatientId, Severity, SlotId, TokenId, VisitKind};

/// What a token is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Booked against one doctor slot.
    Routine {
        /// Doctor owning the slot.
        doctor_id: DoctorId,
        /// Slot reserved by this token.
        slot_id: SlotId,
    },
    /// Materialized when an emergency entry is served; holds no slot.
    Emergency {
        /// Severity the patient arrived with.
        severity: Severity,
    },
}

/// Globally ordered service token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Strictly increasing identifier, never reused.
    pub id: TokenId,
    /// Patient the token was issued to.
    pub patient_id: PatientId,
    /// Routine or emergency payload.
    pub kind: TokenKind,
}

impl Token {
    /// Builds a routine token for `slot_id` on `doctor_id`.
    pub fn routine(
        id: TokenId,
        patient_id: PatientId,
        doctor_id: DoctorId,
        slot_id: SlotId,
    ) -> Self {
        Self {
            id,
            patient_id,
            kind: TokenKind::Routine { doctor_id, slot_id },
        }
    }

    /// Builds an emergency token.
    pub fn emergency(id: TokenId, patient_id: PatientId, severity: Severity) -> Self {
        Self {
            id,
            patient_id,
            kind: TokenKind::Emergency { severity },
        }
    }

    /// Queue discipline that produced this token.
    pub fn visit(&self) -> VisitKind {
        match self.kind {
            TokenKind::Routine { .. } => VisitKind::Routine,
            TokenKind::Emergency { .. } => VisitKind::Emergency,
        }
    }

    /// Doctor backing a routine token; `None` for emergencies.
    pub fn doctor_id(&self) -> Option<DoctorId> {
        match self.kind {
            TokenKind::Routine { doctor_id, .. } => Some(doctor_id),
            TokenKind::Emergency { .. } => None,
        }
    }

    /// Slot backing a routine token; `None` for emergencies.
    pub fn slot_id(&self) -> Option<SlotId> {
        match self.kind {
            TokenKind::Routine { slot_id, .. } => Some(slot_id),
            TokenKind::Emergency { .. } => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Routine { doctor_id, slot_id } => write!(
                f,
                "Token[id={},pid={},did={},slot={},type={}]",
                self.id,
                self.patient_id,
                doctor_id,
                slot_id,
                self.visit()
            ),
            TokenKind::Emergency { severity } => write!(
                f,
                "Token[id={},pid={},severity={},type={}]",
                self.id,
                self.patient_id,
                severity,
                self.visit()
            ),
        }
    }
}
