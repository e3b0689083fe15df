//! Engine configuration.

use std::env;

use tracing::warn;

use crate::types::DEFAULT_ROUTINE_CAPACITY;

/// Environment variable overriding [`EngineConfig::routine_capacity`].
pub const ROUTINE_CAPACITY_ENV: &str = "TRIAGE_ROUTINE_CAPACITY";

/// Sizing knobs for a [`crate::core::engine::TriageEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of queued routine tokens. Values below 1 are raised to 1.
    pub routine_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            routine_capacity: DEFAULT_ROUTINE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Reads overrides from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    /// Unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let routine_capacity = match lookup(ROUTINE_CAPACITY_ENV) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!("{ROUTINE_CAPACITY_ENV}={raw:?} is not a valid capacity, using default");
                DEFAULT_ROUTINE_CAPACITY
            }),
            None => DEFAULT_ROUTINE_CAPACITY,
        };

        Self { routine_capacity }
    }
}
