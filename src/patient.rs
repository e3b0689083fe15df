//! Patient record type.

use serde::{Deserialize, Serialize};

use crate::types::{PatientId, Severity};

/// Registered patient. Re-registering the same id overwrites every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Caller-supplied identifier.
    pub id: PatientId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Triage severity recorded at registration.
    pub severity: Severity,
}

impl Patient {
    /// Builds a patient record.
    pub fn new(id: PatientId, name: impl Into<String>, age: u32, severity: Severity) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            severity,
        }
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient[id={},name={},age={},severity={}]",
            self.id, self.name, self.age, self.severity
        )
    }
}
