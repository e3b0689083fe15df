use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    doctor::{Doctor, Slot},
    error::{TriageError, TriageResult},
    op::UndoRecord,
    patient::Patient,
    report::{DoctorReport, TriageReport},
    token::{Token, TokenKind},
    types::{DoctorId, PatientId, Severity, SlotId, TokenId},
};

use super::{
    doctors::DoctorRegistry,
    emergency::{EmergencyEntry, EmergencyQueue},
    patients::PatientRegistry,
    routine::RoutineQueue,
    undo::UndoLog,
};

/// Outcome of a successful [`TriageEngine::serve_next`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Served {
    /// Token that was served. Emergency tokens are minted here.
    pub token: Token,
    /// Patient record at serve time; `None` if it was removed meanwhile.
    pub patient: Option<Patient>,
    /// True when a routine token's slot was found and released.
    pub slot_freed: bool,
}

/// Outcome of undoing a routine booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReverted {
    /// Token named by the undo record.
    pub token: Token,
    /// True when the token was still queued and has been removed.
    pub removed: bool,
}

/// Clinic triage engine: registries, both queues, the undo log, and the
/// token counter. Token ids start at 1.
#[derive(Debug)]
pub struct TriageEngine {
    patients: PatientRegistry,
    doctors: DoctorRegistry,
    routine: RoutineQueue,
    emergency: EmergencyQueue,
    undo: UndoLog,
    next_token_id: TokenId,
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageEngine {
    /// Engine with [`EngineConfig::default`].
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Empty engine sized by `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            patients: PatientRegistry::new(),
            doctors: DoctorRegistry::new(),
            routine: RoutineQueue::with_capacity(config.routine_capacity),
            emergency: EmergencyQueue::new(),
            undo: UndoLog::new(),
            next_token_id: 1,
        }
    }

    /// Installs the clinic's opening roster: doctor 1 with two morning slots.
    pub fn seed_demo(&mut self) -> TriageResult<()> {
        self.add_doctor(1, "Dr. Sharma", "General");
        self.add_slot_to_doctor(1, 101, "09:00", "09:15")?;
        self.add_slot_to_doctor(1, 102, "09:15", "09:30")?;
        Ok(())
    }

    /// Inserts or overwrites a patient. Not recorded for undo.
    pub fn register_patient(
        &mut self,
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        severity: Severity,
    ) -> Patient {
        let patient = Patient::new(id, name, age, severity);
        let replaced = self.patients.upsert(patient.clone()).is_some();
        info!(patient_id = id, replaced, "patient registered");
        patient
    }

    /// Deletes a patient. Tokens and emergency entries that name it stay.
    pub fn remove_patient(&mut self, id: PatientId) -> bool {
        let removed = self.patients.delete(id);
        info!(patient_id = id, removed, "patient removed");
        removed
    }

    /// Adds a doctor with no slots, replacing any doctor with the same id.
    pub fn add_doctor(
        &mut self,
        id: DoctorId,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Doctor {
        let doctor = Doctor::new(id, name, specialization);
        let replaced = self.doctors.insert(doctor.clone()).is_some();
        info!(doctor_id = id, replaced, "doctor added");
        doctor
    }

    /// Adds an unbooked slot, scanned before the doctor's older slots.
    pub fn add_slot_to_doctor(
        &mut self,
        doctor_id: DoctorId,
        slot_id: SlotId,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> TriageResult<Slot> {
        let start = start.into();
        let end = end.into();
        self.doctors.add_slot(doctor_id, slot_id, start.clone(), end.clone())?;
        info!(doctor_id, slot_id, %start, %end, "slot added");
        Ok(Slot {
            id: slot_id,
            start,
            end,
            booked_by: None,
        })
    }

    /// Removes a slot regardless of booking state. Not recorded for undo.
    pub fn cancel_slot(&mut self, doctor_id: DoctorId, slot_id: SlotId) -> TriageResult<bool> {
        let removed = self.doctors.cancel_slot(doctor_id, slot_id)?;
        info!(doctor_id, slot_id, removed, "slot cancelled");
        Ok(removed)
    }

    /// Reserves the doctor's next free slot and queues a routine token for it.
    ///
    /// If the routine queue is full the slot is released again and
    /// [`TriageError::RoutineQueueFull`] is returned.
    pub fn book_routine(
        &mut self,
        patient_id: PatientId,
        doctor_id: DoctorId,
    ) -> TriageResult<Token> {
        if !self.patients.contains(patient_id) || !self.doctors.contains(doctor_id) {
            return Err(TriageError::PatientOrDoctorMissing {
                patient_id,
                doctor_id,
            });
        }

        let slot_id = self.doctors.book_next_free(doctor_id, self.next_token_id)?;
        let token = Token::routine(self.take_next_token_id(), patient_id, doctor_id, slot_id);
        if !self.routine.enqueue(token) {
            self.release_slot(&token);
            warn!(
                token_id = token.id,
                doctor_id,
                slot_id,
                capacity = self.routine.capacity(),
                "routine queue full, slot booking rolled back"
            );
            return Err(TriageError::RoutineQueueFull {
                capacity: self.routine.capacity(),
            });
        }

        self.undo.push(UndoRecord::Book { token });
        info!(token_id = token.id, patient_id, doctor_id, slot_id, "routine booked");
        Ok(token)
    }

    /// Queues a registered patient for emergency service.
    pub fn emergency_in(
        &mut self,
        patient_id: PatientId,
        severity: Severity,
    ) -> TriageResult<EmergencyEntry> {
        if !self.patients.contains(patient_id) {
            return Err(TriageError::PatientNotFound(patient_id));
        }

        self.emergency.insert(patient_id, severity);
        self.undo.push(UndoRecord::EmergencyInsert { patient_id });
        info!(patient_id, severity, waiting = self.emergency.size(), "emergency arrival");
        Ok(EmergencyEntry {
            patient_id,
            severity,
        })
    }

    /// Serves the most critical emergency, or else the oldest routine token.
    pub fn serve_next(&mut self) -> TriageResult<Served> {
        if let Some(entry) = self.emergency.extract_min() {
            let token =
                Token::emergency(self.take_next_token_id(), entry.patient_id, entry.severity);
            self.undo.push(UndoRecord::Serve { token });
            info!(
                token_id = token.id,
                patient_id = entry.patient_id,
                severity = entry.severity,
                "served emergency"
            );
            return Ok(Served {
                token,
                patient: self.patients.get(entry.patient_id).cloned(),
                slot_freed: false,
            });
        }

        let token = self.routine.dequeue().ok_or(TriageError::NothingToServe)?;
        self.undo.push(UndoRecord::Serve { token });
        let slot_freed = self.release_slot(&token);
        info!(
            token_id = token.id,
            patient_id = token.patient_id,
            slot_freed,
            "served routine"
        );
        Ok(Served {
            token,
            patient: self.patients.get(token.patient_id).cloned(),
            slot_freed,
        })
    }

    /// Pops the latest undo record and reverses it where supported.
    ///
    /// Only bookings can be reversed. Emergency arrivals and serves are
    /// popped and reported as [`TriageError::UndoUnsupported`].
    pub fn undo_last(&mut self) -> TriageResult<BookingReverted> {
        let record = self.undo.pop().ok_or(TriageError::NothingToUndo)?;
        match record {
            UndoRecord::Book { token } => {
                let removed = self.routine.remove(token.id).is_some();
                // A token that already left the queue no longer owns its slot.
                if removed {
                    self.release_slot(&token);
                }
                info!(token_id = token.id, removed, "undo booking");
                Ok(BookingReverted { token, removed })
            }
            other => {
                warn!(action = other.label(), "undo not supported, record discarded");
                Err(TriageError::UndoUnsupported(other))
            }
        }
    }

    /// Per-doctor slot usage plus queue and registry sizes. Read-only.
    pub fn report(&self) -> TriageReport {
        let doctors = self
            .doctors
            .sorted()
            .into_iter()
            .map(|d| DoctorReport {
                doctor_id: d.id,
                name: d.name.clone(),
                specialization: d.specialization.clone(),
                booked_slots: d.slots.booked_count(),
                next_free: d.slots.find_next_free().cloned(),
            })
            .collect();

        let report = TriageReport {
            doctors,
            routine_queue_len: self.routine.size(),
            emergency_queue_len: self.emergency.size(),
            total_patients: self.patients.len(),
        };
        debug!(
            routine = report.routine_queue_len,
            emergency = report.emergency_queue_len,
            patients = report.total_patients,
            "report built"
        );
        report
    }

    /// Patient by id.
    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(id)
    }

    /// Registered patients sorted by id.
    pub fn patients(&self) -> Vec<&Patient> {
        let mut out = self.patients.all_patients();
        out.sort_by_key(|p| p.id);
        out
    }

    /// Doctor by id, slots included.
    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.get(id)
    }

    /// Slot the next booking with `doctor_id` would take.
    pub fn find_next_free(&self, doctor_id: DoctorId) -> TriageResult<Option<&Slot>> {
        self.doctors.find_next_free(doctor_id)
    }

    /// Oldest queued routine token.
    pub fn next_routine(&self) -> Option<&Token> {
        self.routine.peek()
    }

    /// Queued routine tokens, oldest first.
    pub fn routine_tokens(&self) -> Vec<Token> {
        self.routine.iter().copied().collect()
    }

    /// Most critical waiting emergency.
    pub fn next_emergency(&self) -> Option<&EmergencyEntry> {
        self.emergency.peek_min()
    }

    /// Queued routine tokens.
    pub fn routine_len(&self) -> usize {
        self.routine.size()
    }

    /// Routine queue capacity.
    pub fn routine_capacity(&self) -> usize {
        self.routine.capacity()
    }

    /// Waiting emergency entries.
    pub fn emergency_len(&self) -> usize {
        self.emergency.size()
    }

    /// Records in the undo log.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Record the next [`TriageEngine::undo_last`] would pop.
    pub fn last_undo(&self) -> Option<&UndoRecord> {
        self.undo.last()
    }

    /// Id the next issued token will carry.
    pub fn peek_next_token_id(&self) -> TokenId {
        self.next_token_id
    }

    /// Frees the slot a routine token holds, if it still holds one.
    fn release_slot(&mut self, token: &Token) -> bool {
        match token.kind {
            TokenKind::Routine { doctor_id, slot_id } => {
                self.doctors.release(doctor_id, slot_id, token.id)
            }
            TokenKind::Emergency { .. } => false,
        }
    }

    fn take_next_token_id(&mut self) -> TokenId {
        let id = self.next_token_id;
        self.next_token_id += 1;
        id
    }
}
