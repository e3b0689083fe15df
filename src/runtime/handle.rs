use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    core::{
        emergency::EmergencyEntry,
        engine::{BookingReverted, Served, TriageEngine},
    },
    doctor::{Doctor, Slot},
    error::TriageError,
    op::UndoRecord,
    patient::Patient,
    report::TriageReport,
    token::Token,
    types::{DoctorId, PatientId, Severity, SlotId},
};

use super::events::TriageEvent;

/// Failure of a call made through a [`TriageHandle`].
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The engine rejected the call.
    #[error(transparent)]
    Triage(#[from] TriageError),
    /// The runtime task has stopped.
    #[error("triage runtime channel closed")]
    ChannelClosed,
}

/// Channel sizing for [`spawn_triage`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Commands buffered before callers wait.
    pub command_queue_bound: usize,
    /// Events retained for slow subscribers.
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

/// Cloneable front door to an engine owned by one background task.
pub struct TriageHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<TriageEvent>,
}

impl Clone for TriageHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, TriageError>>;

enum Command {
    RegisterPatient {
        patient: Patient,
        resp: oneshot::Sender<Patient>,
    },
    RemovePatient {
        id: PatientId,
        resp: oneshot::Sender<bool>,
    },
    AddDoctor {
        id: DoctorId,
        name: String,
        specialization: String,
        resp: oneshot::Sender<Doctor>,
    },
    AddSlot {
        doctor_id: DoctorId,
        slot_id: SlotId,
        start: String,
        end: String,
        resp: Reply<Slot>,
    },
    CancelSlot {
        doctor_id: DoctorId,
        slot_id: SlotId,
        resp: Reply<bool>,
    },
    BookRoutine {
        patient_id: PatientId,
        doctor_id: DoctorId,
        resp: Reply<Token>,
    },
    EmergencyIn {
        patient_id: PatientId,
        severity: Severity,
        resp: Reply<EmergencyEntry>,
    },
    ServeNext {
        resp: Reply<Served>,
    },
    UndoLast {
        resp: Reply<BookingReverted>,
    },
    Report {
        resp: oneshot::Sender<TriageReport>,
    },
    GetPatient {
        id: PatientId,
        resp: oneshot::Sender<Option<Patient>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `engine` into a background task and returns a handle to it.
///
/// Must be called inside a tokio runtime.
pub fn spawn_triage(engine: TriageEngine, config: RuntimeConfig) -> TriageHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<TriageEvent>(config.event_queue_bound.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut engine = engine;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut engine, &events_tx_loop) {
                break;
            }
        }
        debug!("triage runtime stopped");
    });

    TriageHandle { cmd_tx, events_tx }
}

impl TriageHandle {
    /// Receiver for events emitted after each successful mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<TriageEvent> {
        self.events_tx.subscribe()
    }

    /// See [`TriageEngine::register_patient`].
    pub async fn register_patient(
        &self,
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        severity: Severity,
    ) -> Result<Patient, RuntimeError> {
        let patient = Patient::new(id, name, age, severity);
        self.call(|resp| Command::RegisterPatient { patient, resp }).await
    }

    /// See [`TriageEngine::remove_patient`].
    pub async fn remove_patient(&self, id: PatientId) -> Result<bool, RuntimeError> {
        self.call(|resp| Command::RemovePatient { id, resp }).await
    }

    /// See [`TriageEngine::add_doctor`].
    pub async fn add_doctor(
        &self,
        id: DoctorId,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Result<Doctor, RuntimeError> {
        let name = name.into();
        let specialization = specialization.into();
        self.call(|resp| Command::AddDoctor {
            id,
            name,
            specialization,
            resp,
        })
        .await
    }

    /// See [`TriageEngine::add_slot_to_doctor`].
    pub async fn add_slot_to_doctor(
        &self,
        doctor_id: DoctorId,
        slot_id: SlotId,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Slot, RuntimeError> {
        let start = start.into();
        let end = end.into();
        self.call(|resp| Command::AddSlot {
            doctor_id,
            slot_id,
            start,
            end,
            resp,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::cancel_slot`].
    pub async fn cancel_slot(
        &self,
        doctor_id: DoctorId,
        slot_id: SlotId,
    ) -> Result<bool, RuntimeError> {
        self.call(|resp| Command::CancelSlot {
            doctor_id,
            slot_id,
            resp,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::book_routine`].
    pub async fn book_routine(
        &self,
        patient_id: PatientId,
        doctor_id: DoctorId,
    ) -> Result<Token, RuntimeError> {
        self.call(|resp| Command::BookRoutine {
            patient_id,
            doctor_id,
            resp,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::emergency_in`].
    pub async fn emergency_in(
        &self,
        patient_id: PatientId,
        severity: Severity,
    ) -> Result<EmergencyEntry, RuntimeError> {
        self.call(|resp| Command::EmergencyIn {
            patient_id,
            severity,
            resp,
        })
        .await?
        .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::serve_next`].
    pub async fn serve_next(&self) -> Result<Served, RuntimeError> {
        self.call(|resp| Command::ServeNext { resp })
            .await?
            .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::undo_last`].
    pub async fn undo_last(&self) -> Result<BookingReverted, RuntimeError> {
        self.call(|resp| Command::UndoLast { resp })
            .await?
            .map_err(RuntimeError::from)
    }

    /// See [`TriageEngine::report`].
    pub async fn report(&self) -> Result<TriageReport, RuntimeError> {
        self.call(|resp| Command::Report { resp }).await
    }

    /// Copy of the patient record, if registered.
    pub async fn patient(&self, id: PatientId) -> Result<Option<Patient>, RuntimeError> {
        self.call(|resp| Command::GetPatient { id, resp }).await
    }

    /// Stops the command loop. Calls made afterwards fail with
    /// [`RuntimeError::ChannelClosed`].
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.call(|resp| Command::Shutdown { resp }).await
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    engine: &mut TriageEngine,
    events_tx: &broadcast::Sender<TriageEvent>,
) -> bool {
    match cmd {
        Command::RegisterPatient { patient, resp } => {
            let out =
                engine.register_patient(patient.id, patient.name, patient.age, patient.severity);
            let _ = events_tx.send(TriageEvent::PatientRegistered { patient_id: out.id });
            let _ = resp.send(out);
        }
        Command::RemovePatient { id, resp } => {
            let removed = engine.remove_patient(id);
            if removed {
                let _ = events_tx.send(TriageEvent::PatientRemoved { patient_id: id });
            }
            let _ = resp.send(removed);
        }
        Command::AddDoctor {
            id,
            name,
            specialization,
            resp,
        } => {
            let out = engine.add_doctor(id, name, specialization);
            let _ = events_tx.send(TriageEvent::DoctorAdded { doctor_id: id });
            let _ = resp.send(out);
        }
        Command::AddSlot {
            doctor_id,
            slot_id,
            start,
            end,
            resp,
        } => {
            let res = engine.add_slot_to_doctor(doctor_id, slot_id, start, end);
            if res.is_ok() {
                let _ = events_tx.send(TriageEvent::SlotAdded { doctor_id, slot_id });
            }
            let _ = resp.send(res);
        }
        Command::CancelSlot {
            doctor_id,
            slot_id,
            resp,
        } => {
            let res = engine.cancel_slot(doctor_id, slot_id);
            if let Ok(true) = res {
                let _ = events_tx.send(TriageEvent::SlotCancelled { doctor_id, slot_id });
            }
            let _ = resp.send(res);
        }
        Command::BookRoutine {
            patient_id,
            doctor_id,
            resp,
        } => {
            let res = engine.book_routine(patient_id, doctor_id);
            if let Ok(token) = &res {
                let _ = events_tx.send(TriageEvent::Booked {
                    token_id: token.id,
                    patient_id,
                });
            }
            let _ = resp.send(res);
        }
        Command::EmergencyIn {
            patient_id,
            severity,
            resp,
        } => {
            let res = engine.emergency_in(patient_id, severity);
            if res.is_ok() {
                let _ = events_tx.send(TriageEvent::EmergencyArrived { patient_id, severity });
            }
            let _ = resp.send(res);
        }
        Command::ServeNext { resp } => {
            let res = engine.serve_next();
            if let Ok(served) = &res {
                let _ = events_tx.send(TriageEvent::Served {
                    token_id: served.token.id,
                    patient_id: served.token.patient_id,
                    visit: served.token.visit(),
                });
            }
            let _ = resp.send(res);
        }
        Command::UndoLast { resp } => {
            let res = engine.undo_last();
            match &res {
                Ok(reverted) => {
                    let _ = events_tx.send(TriageEvent::UndoApplied {
                        record: UndoRecord::Book {
                            token: reverted.token,
                        },
                        reverted: reverted.removed,
                    });
                }
                Err(TriageError::UndoUnsupported(record)) => {
                    let _ = events_tx.send(TriageEvent::UndoApplied {
                        record: record.clone(),
                        reverted: false,
                    });
                }
                Err(_) => {}
            }
            let _ = resp.send(res);
        }
        Command::Report { resp } => {
            let _ = resp.send(engine.report());
        }
        Command::GetPatient { id, resp } => {
            let _ = resp.send(engine.patient(id).cloned());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
