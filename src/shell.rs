use std::str::FromStr;

use crate::types::{DoctorId, PatientId, Severity, SlotId};

/// Command summary printed at startup and by `help`.
pub const HELP: &str = "\
Commands:
  patient <id> <name> <age> <severity 0-100>
  doctor <id> <name> <specialization>
  slot <doctor-id> <slot-id> <start> <end>
  book <patient-id> <doctor-id>
  emergency <patient-id> <severity>
  serve
  undo
  report [--json]
  help
  exit";

/// Highest severity the shell accepts for a patient record.
pub const MAX_SEVERITY: Severity = 100;

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Register or overwrite a patient.
    Patient {
        /// Patient id.
        id: PatientId,
        /// Every word between the id and the age.
        name: String,
        /// Age in years.
        age: u32,
        /// Recorded severity, at most [`MAX_SEVERITY`].
        severity: Severity,
    },
    /// Register or replace a doctor.
    Doctor {
        /// Doctor id.
        id: DoctorId,
        /// Every word between the id and the specialization.
        name: String,
        /// Last word on the line.
        specialization: String,
    },
    /// Add a slot to a doctor.
    Slot {
        /// Owning doctor.
        doctor_id: DoctorId,
        /// New slot id.
        slot_id: SlotId,
        /// Start label.
        start: String,
        /// End label.
        end: String,
    },
    /// Book a routine visit.
    Book {
        /// Patient to book.
        patient_id: PatientId,
        /// Doctor to book with.
        doctor_id: DoctorId,
    },
    /// Queue an emergency arrival.
    Emergency {
        /// Arriving patient.
        patient_id: PatientId,
        /// Triage severity; lower is served first.
        severity: Severity,
    },
    /// Serve the next patient.
    Serve,
    /// Undo the latest recorded action.
    Undo,
    /// Print the report.
    Report {
        /// Emit JSON instead of text.
        json: bool,
    },
    /// Print [`HELP`].
    Help,
    /// Leave the shell.
    Exit,
}

/// Parses one input line. The verb is case-insensitive; the error string is
/// meant for the user.
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err("Invalid option.".to_string());
    };

    match (verb.to_ascii_lowercase().as_str(), args) {
        ("patient", [id, name @ .., age, severity]) if !name.is_empty() => {
            let severity: Severity = num(severity, "severity")?;
            if severity > MAX_SEVERITY {
                return Err(format!("severity must be between 0 and {MAX_SEVERITY}"));
            }
            Ok(ShellCommand::Patient {
                id: num(id, "patient id")?,
                name: name.join(" "),
                age: num(age, "age")?,
                severity,
            })
        }
        ("doctor", [id, name @ .., specialization]) if !name.is_empty() => {
            Ok(ShellCommand::Doctor {
                id: num(id, "doctor id")?,
                name: name.join(" "),
                specialization: specialization.to_string(),
            })
        }
        ("slot", [doctor_id, slot_id, start, end]) => Ok(ShellCommand::Slot {
            doctor_id: num(doctor_id, "doctor id")?,
            slot_id: num(slot_id, "slot id")?,
            start: start.to_string(),
            end: end.to_string(),
        }),
        ("book", [patient_id, doctor_id]) => Ok(ShellCommand::Book {
            patient_id: num(patient_id, "patient id")?,
            doctor_id: num(doctor_id, "doctor id")?,
        }),
        ("emergency", [patient_id, severity]) => Ok(ShellCommand::Emergency {
            patient_id: num(patient_id, "patient id")?,
            severity: num(severity, "severity")?,
        }),
        ("serve", []) => Ok(ShellCommand::Serve),
        ("undo", []) => Ok(ShellCommand::Undo),
        ("report", []) => Ok(ShellCommand::Report { json: false }),
        ("report", ["--json"]) => Ok(ShellCommand::Report { json: true }),
        ("help", _) => Ok(ShellCommand::Help),
        ("exit" | "quit", _) => Ok(ShellCommand::Exit),
        _ => Err(format!("Invalid option: {line}. Type `help` for commands.")),
    }
}

fn num<T: FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.parse::<T>().map_err(|_| format!("invalid {what}: {raw}"))
}
