use clinic_triage::{
    config::{EngineConfig, ROUTINE_CAPACITY_ENV},
    types::DEFAULT_ROUTINE_CAPACITY,
};

fn with_capacity(raw: Option<&str>) -> EngineConfig {
    EngineConfig::from_lookup(|key| {
        assert_eq!(key, ROUTINE_CAPACITY_ENV);
        raw.map(str::to_string)
    })
}

#[test]
fn unset_capacity_uses_default() {
    assert_eq!(with_capacity(None).routine_capacity, DEFAULT_ROUTINE_CAPACITY);
    assert_eq!(DEFAULT_ROUTINE_CAPACITY, 200);
}

#[test]
fn unparsable_capacity_falls_back_to_200() {
    assert_eq!(with_capacity(Some("abc")).routine_capacity, 200);
    assert_eq!(with_capacity(Some("-5")).routine_capacity, 200);
    assert_eq!(with_capacity(Some("")).routine_capacity, 200);
}

#[test]
fn numeric_capacity_is_used() {
    assert_eq!(with_capacity(Some("25")).routine_capacity, 25);
    assert_eq!(with_capacity(Some(" 7 ")).routine_capacity, 7);
}

#[test]
fn from_env_reads_process_environment() {
    // only test in this binary touching the process environment
    unsafe { std::env::set_var(ROUTINE_CAPACITY_ENV, "not-a-number") };
    assert_eq!(EngineConfig::from_env().routine_capacity, 200);

    unsafe { std::env::set_var(ROUTINE_CAPACITY_ENV, "12") };
    assert_eq!(EngineConfig::from_env().routine_capacity, 12);

    unsafe { std::env::remove_var(ROUTINE_CAPACITY_ENV) };
    assert_eq!(EngineConfig::from_env(), EngineConfig::default());
}
