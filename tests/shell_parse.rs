use clinic_triage::shell::{parse, ShellCommand};

#[test]
fn patient_name_spans_middle_words() {
    assert_eq!(
        parse("patient 3 Mary Ann Lee 40 12"),
        Ok(ShellCommand::Patient {
            id: 3,
            name: "Mary Ann Lee".to_string(),
            age: 40,
            severity: 12,
        })
    );
}

#[test]
fn patient_severity_above_100_is_rejected() {
    assert_eq!(
        parse("patient 3 Mary 40 101"),
        Err("severity must be between 0 and 100".to_string())
    );
    assert!(matches!(
        parse("patient 3 Mary 40 100"),
        Ok(ShellCommand::Patient { severity: 100, .. })
    ));
    // 300 does not fit a severity at all
    assert_eq!(parse("patient 3 Mary 40 300"), Err("invalid severity: 300".to_string()));
}

#[test]
fn doctor_specialization_is_last_word() {
    assert_eq!(
        parse("doctor 2 Dr. Lee Peds"),
        Ok(ShellCommand::Doctor {
            id: 2,
            name: "Dr. Lee".to_string(),
            specialization: "Peds".to_string(),
        })
    );
    // a name is required besides the specialization
    assert!(parse("doctor 2 Peds").is_err());
}

#[test]
fn simple_verbs_and_flags() {
    assert_eq!(parse("SERVE"), Ok(ShellCommand::Serve));
    assert_eq!(parse("undo"), Ok(ShellCommand::Undo));
    assert_eq!(parse("report"), Ok(ShellCommand::Report { json: false }));
    assert_eq!(parse("report --json"), Ok(ShellCommand::Report { json: true }));
    assert_eq!(parse("quit"), Ok(ShellCommand::Exit));
    assert_eq!(
        parse("slot 1 101 09:00 09:15"),
        Ok(ShellCommand::Slot {
            doctor_id: 1,
            slot_id: 101,
            start: "09:00".to_string(),
            end: "09:15".to_string(),
        })
    );
    assert_eq!(
        parse("emergency 4 0"),
        Ok(ShellCommand::Emergency {
            patient_id: 4,
            severity: 0,
        })
    );
}

#[test]
fn malformed_lines_are_rejected() {
    assert_eq!(parse("   "), Err("Invalid option.".to_string()));
    assert_eq!(parse("book x 1"), Err("invalid patient id: x".to_string()));
    assert!(parse("serve now").is_err());
    assert!(parse("report --xml").is_err());
    assert!(parse("fly 1").unwrap_err().contains("Invalid option: fly 1"));
}
