mod env;
pub mod serde_helpers;
mod validation;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use env::{
    ENV_APPLICATION_ID, ENV_BASE_URL, ENV_MAX_IN_FLIGHT, ENV_SERVICE_ID, ENV_TIMEOUT_SECS,
    ENV_USER_AGENT,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Environment error: {0}")]
    EnvError(String),
}

/// Static settings for one collector. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Collection endpoint base; entries go to `{base_url}/logs`
    pub base_url: String,
    pub service_id: String,
    pub application_id: String,

    /// Upper bound on a whole request, connect through response
    #[serde(with = "serde_helpers", default = "default_timeout")]
    pub timeout: Duration,

    /// Cap on concurrently running sends; `None` leaves them unbounded
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_user_agent() -> String {
    format!("pushlogs/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Builds a validated config with the default 15 second timeout.
    pub fn new(
        base_url: impl Into<String>,
        service_id: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
            service_id: service_id.into(),
            application_id: application_id.into(),
            timeout: DEFAULT_TIMEOUT,
            max_in_flight: None,
            user_agent: default_user_agent(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Result<Self, ConfigError> {
        self.max_in_flight = Some(limit);
        self.validate()?;
        Ok(self)
    }

    /// Full URL entries are posted to.
    pub fn logs_url(&self) -> String {
        format!("{}/logs", self.base_url.trim_end_matches('/'))
    }
}
