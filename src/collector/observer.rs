use crate::domain::LogEntry;
use crate::sender::{TransmissionError, TransmissionResult};
use tracing::{debug, error};

#[cfg(test)]
use mockall::automock;

/// Receives the outcome of every send a collector dispatches.
///
/// Called from the send task, never from the logging caller. Implementations
/// must not panic.
#[cfg_attr(test, automock)]
pub trait DeliveryObserver: Send + Sync {
    fn on_delivered(&self, _entry: &LogEntry, _result: &TransmissionResult) {}

    fn on_failure(&self, entry: &LogEntry, error: &TransmissionError);
}

/// Default observer: one `tracing` error event per failed send.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DeliveryObserver for TracingObserver {
    fn on_delivered(&self, entry: &LogEntry, result: &TransmissionResult) {
        debug!(
            trace_id = %entry.trace_id,
            status = result.status_code,
            "log delivered"
        );
    }

    fn on_failure(&self, entry: &LogEntry, error: &TransmissionError) {
        error!(
            trace_id = %entry.trace_id,
            log_level = %entry.level,
            "pushlogs: {error}"
        );
    }
}
