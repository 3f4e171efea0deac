//! Serde adapter for `Duration` fields (whole milliseconds) and the
//! `PUSHLOGS_*` environment lookups used by `Config::from_env`.

use super::ConfigError;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;
use std::time::Duration;

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Parses `name` into `target` when the variable is set; unset keeps the default.
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = std::env::var(name) else {
        return Ok(());
    };
    *target = raw
        .parse()
        .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    Ok(())
}

/// Copies `name` into `target` verbatim when set.
pub fn load_env_string(name: &str, target: &mut String) {
    if let Ok(raw) = std::env::var(name) {
        *target = raw;
    }
}
