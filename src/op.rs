//! Undo record model.

use serde::{Deserialize, Serialize};

use crate::{token::Token, types::PatientId};

/// One entry in the undo log, pushed by every successful mutating call
/// that can be referred back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoRecord {
    /// A routine booking that enqueued `token`.
    Book {
        /// Token that was queued.
        token: Token,
    },
    /// An emergency arrival.
    EmergencyInsert {
        /// Patient that was pushed onto the emergency queue.
        patient_id: PatientId,
    },
    /// A served token, routine or emergency.
    Serve {
        /// Token that left the queues.
        token: Token,
    },
}

impl UndoRecord {
    /// Short lowercase label used in logs and shell output.
    pub fn label(&self) -> &'static str {
        match self {
            UndoRecord::Book { .. } => "book",
            UndoRecord::EmergencyInsert { .. } => "emergency",
            UndoRecord::Serve { .. } => "serve",
        }
    }
}
