use crate::config::ConfigError;
use crate::sender::ClientError;
use thiserror::Error;

/// Error returned when a collector cannot be brought up.
///
/// Delivery failures never surface here; they stop at the collector's
/// observer.
#[derive(Error, Debug)]
pub enum PushLogsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] ClientError),
}
