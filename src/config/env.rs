use super::serde_helpers::{load_env_string, load_env_var};
use super::{Config, ConfigError, DEFAULT_TIMEOUT, default_user_agent};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "PUSHLOGS_BASE_URL";
pub const ENV_SERVICE_ID: &str = "PUSHLOGS_SERVICE_ID";
pub const ENV_APPLICATION_ID: &str = "PUSHLOGS_APPLICATION_ID";
pub const ENV_TIMEOUT_SECS: &str = "PUSHLOGS_TIMEOUT_SECS";
pub const ENV_MAX_IN_FLIGHT: &str = "PUSHLOGS_MAX_IN_FLIGHT";
pub const ENV_USER_AGENT: &str = "PUSHLOGS_USER_AGENT";

impl Config {
    /// Loads the config from `PUSHLOGS_*` environment variables.
    ///
    /// Unset optional variables keep their defaults; the identity variables
    /// must be present and non-empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config {
            base_url: String::new(),
            service_id: String::new(),
            application_id: String::new(),
            timeout: DEFAULT_TIMEOUT,
            max_in_flight: None,
            user_agent: default_user_agent(),
        };

        load_env_string(ENV_BASE_URL, &mut config.base_url);
        load_env_string(ENV_SERVICE_ID, &mut config.service_id);
        load_env_string(ENV_APPLICATION_ID, &mut config.application_id);
        load_env_string(ENV_USER_AGENT, &mut config.user_agent);

        let mut timeout_secs = DEFAULT_TIMEOUT.as_secs();
        load_env_var(ENV_TIMEOUT_SECS, &mut timeout_secs)?;
        config.timeout = Duration::from_secs(timeout_secs);

        if let Ok(value) = std::env::var(ENV_MAX_IN_FLIGHT) {
            let limit = value.parse::<usize>().map_err(|e| {
                ConfigError::EnvError(format!("Invalid {ENV_MAX_IN_FLIGHT}: {e}"))
            })?;
            config.max_in_flight = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }
}
