use super::{Config, ConfigError};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Identity fields are mandatory, checked in declaration order
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url"));
        }
        if self.service_id.is_empty() {
            return Err(ConfigError::MissingField("service_id"));
        }
        if self.application_id.is_empty() {
            return Err(ConfigError::MissingField("application_id"));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidConfig(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_in_flight == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Max in-flight sends must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
