use crate::config::Config;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// One pooled HTTP client bound to a collection endpoint.
///
/// `reqwest::Client` is reference counted internally, so clones share the
/// connection pool and may be used from any number of tasks at once.
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
    logs_url: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ClientError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            logs_url: config.logs_url(),
            timeout: config.timeout,
        })
    }

    pub fn logs_url(&self) -> &str {
        &self.logs_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
