use hashbrown::HashMap;

use crate::{patient::Patient, types::PatientId};

/// Patients keyed by id.
#[derive(Debug, Default)]
pub struct PatientRegistry {
    records: HashMap<PatientId, Patient>,
}

impl PatientRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by id. Returns the previous record, if any.
    pub fn upsert(&mut self, patient: Patient) -> Option<Patient> {
        self.records.insert(patient.id, patient)
    }

    /// Patient by id.
    pub fn get(&self, id: PatientId) -> Option<&Patient> {
        self.records.get(&id)
    }

    /// True when a patient is registered under `id`.
    pub fn contains(&self, id: PatientId) -> bool {
        self.records.contains_key(&id)
    }

    /// Removes by id; false when absent.
    pub fn delete(&mut self, id: PatientId) -> bool {
        self.records.remove(&id).is_some()
    }

    /// All records, in no particular order.
    pub fn all_patients(&self) -> Vec<&Patient> {
        self.records.values().collect()
    }

    /// Number of patients.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no patient is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
