use super::HttpClient;
use super::serialization::{SerializationError, serialize_entry};
use crate::domain::LogEntry;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Why a single send did not land. Every variant is terminal: nothing is
/// retried or queued.
#[derive(Error, Debug)]
pub enum TransmissionError {
    #[error("error marshaling log: {0}")]
    Serialization(#[from] SerializationError),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("error sending log: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("log send failed, status: {status}")]
    Rejected { status: u16 },
    #[error("no async runtime available to send log")]
    NoRuntime,
}

impl TransmissionError {
    fn from_request(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            TransmissionError::Timeout(timeout)
        } else {
            TransmissionError::Transport(error)
        }
    }

    /// HTTP status when the endpoint answered with a non-2xx code.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransmissionError::Rejected { status } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransmissionResult {
    pub status_code: u16,
    pub latency: Duration,
    pub bytes_sent: usize,
}

/// Posts single entries to `{base_url}/logs`.
#[derive(Debug, Clone)]
pub struct LogTransmitter {
    pub client: HttpClient,
}

impl LogTransmitter {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, entry: &LogEntry) -> Result<TransmissionResult, TransmissionError> {
        let start = Instant::now();
        let timeout = self.client.timeout();

        let payload = serialize_entry(entry)?;
        let bytes_sent = payload.len();

        let response = self
            .client
            .client
            .post(self.client.logs_url())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(timeout)
            .body(payload)
            .send()
            .await
            .map_err(|e| TransmissionError::from_request(e, timeout))?;

        let status = response.status();
        // Release the connection back to the pool; the body carries no contract
        drop(response);
        let latency = start.elapsed();

        if !status.is_success() {
            return Err(TransmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(
            "Sent log for trace {} ({} bytes) in {:?}",
            entry.trace_id, bytes_sent, latency
        );

        Ok(TransmissionResult {
            status_code: status.as_u16(),
            latency,
            bytes_sent,
        })
    }
}
