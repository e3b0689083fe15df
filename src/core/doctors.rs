use hashbrown::HashMap;

use crate::{
    doctor::{Doctor, Slot},
    error::{TriageError, TriageResult},
    types::{DoctorId, SlotId, TokenId},
};

/// Doctors keyed by id, each owning its slot list.
#[derive(Debug, Default)]
pub struct DoctorRegistry {
    doctors: HashMap<DoctorId, Doctor>,
}

impl DoctorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a doctor with an empty slot list.
    ///
    /// An existing doctor under the same id is replaced, slots included, and
    /// returned.
    pub fn add_doctor(
        &mut self,
        id: DoctorId,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Option<Doctor> {
        self.insert(Doctor::new(id, name, specialization))
    }

    /// Stores `doctor`, returning the one it replaced.
    pub fn insert(&mut self, doctor: Doctor) -> Option<Doctor> {
        self.doctors.insert(doctor.id, doctor)
    }

    /// Adds an unbooked slot at the front of the doctor's scan order.
    pub fn add_slot(
        &mut self,
        doctor_id: DoctorId,
        slot_id: SlotId,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> TriageResult<()> {
        let doctor = self
            .doctors
            .get_mut(&doctor_id)
            .ok_or(TriageError::DoctorNotFound(doctor_id))?;
        doctor.slots.add(slot_id, start, end);
        Ok(())
    }

    /// Removes the first slot matching `slot_id`, booked or not.
    pub fn cancel_slot(&mut self, doctor_id: DoctorId, slot_id: SlotId) -> TriageResult<bool> {
        let doctor = self
            .doctors
            .get_mut(&doctor_id)
            .ok_or(TriageError::DoctorNotFound(doctor_id))?;
        Ok(doctor.slots.cancel(slot_id))
    }

    /// First unbooked slot in the doctor's scan order.
    pub fn find_next_free(&self, doctor_id: DoctorId) -> TriageResult<Option<&Slot>> {
        let doctor = self
            .doctors
            .get(&doctor_id)
            .ok_or(TriageError::DoctorNotFound(doctor_id))?;
        Ok(doctor.slots.find_next_free())
    }

    /// Books the doctor's next free slot for `token`.
    pub fn book_next_free(&mut self, doctor_id: DoctorId, token: TokenId) -> TriageResult<SlotId> {
        let doctor = self
            .doctors
            .get_mut(&doctor_id)
            .ok_or(TriageError::DoctorNotFound(doctor_id))?;
        doctor
            .slots
            .book_next_free(token)
            .ok_or(TriageError::NoFreeSlot(doctor_id))
    }

    /// Frees the slot held by `token`. A missing doctor or slot, or a slot
    /// held by another token, is a no-op and returns false.
    pub fn release(&mut self, doctor_id: DoctorId, slot_id: SlotId, token: TokenId) -> bool {
        self.doctors
            .get_mut(&doctor_id)
            .is_some_and(|d| d.slots.release(slot_id, token))
    }

    /// Doctor by id.
    pub fn get(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.get(&id)
    }

    /// True when a doctor is registered under `id`.
    pub fn contains(&self, id: DoctorId) -> bool {
        self.doctors.contains_key(&id)
    }

    /// Doctors sorted by id.
    pub fn sorted(&self) -> Vec<&Doctor> {
        let mut out: Vec<&Doctor> = self.doctors.values().collect();
        out.sort_by_key(|d| d.id);
        out
    }

    /// Number of doctors.
    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    /// True when no doctor is registered.
    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
