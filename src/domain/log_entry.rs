use super::log_level::LogLevel;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Current UTC time in the RFC3339 form used on the wire, e.g. `2026-10-18T09:30:00Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A single log line as posted to the collection endpoint.
///
/// Field names follow the endpoint's JSON contract exactly. `service_id` and
/// `application_id` are owned by the collector and overwritten before send;
/// an empty `timestamp` means "not set yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    #[serde(rename = "traceId")]
    pub trace_id: String,
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "applicationId")]
    pub application_id: String,
    #[serde(rename = "logLevel")]
    pub level: LogLevel,
    #[serde(rename = "log")]
    pub message: String,
}

impl LogEntry {
    /// Builds an entry stamped with the current UTC time. Identity fields are
    /// left empty for the collector to fill.
    pub fn new(
        trace_id: impl Into<String>,
        level: impl Into<LogLevel>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: utc_timestamp(),
            trace_id: trace_id.into(),
            service_id: String::new(),
            application_id: String::new(),
            level: level.into(),
            message: message.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Stamps the collector's identity over whatever the caller set, and fills
    /// the timestamp only when it is empty.
    pub fn stamp(&mut self, service_id: &str, application_id: &str) {
        self.service_id = service_id.to_string();
        self.application_id = application_id.to_string();
        if self.timestamp.is_empty() {
            self.timestamp = utc_timestamp();
        }
    }
}
