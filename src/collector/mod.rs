//! The collector: configuration, one shared HTTP client and the
//! fire-and-forget dispatch path.

pub mod dispatch;
pub mod observer;
pub mod stats;

pub use dispatch::Dispatcher;
pub use observer::{DeliveryObserver, TracingObserver};
pub use stats::{DeliverySnapshot, DeliveryStats};

use crate::config::Config;
use crate::domain::{LogEntry, LogLevel, PushLogsError};
use crate::sender::{HttpClient, LogTransmitter, TransmissionError, TransmissionResult};
use std::sync::Arc;
use tracing::warn;

/// Ships log entries to one collection endpoint.
///
/// Every `add_log*` call returns immediately; the send runs on its own task
/// and its outcome only reaches the observer. Clones share the client,
/// dispatcher, observer and counters.
#[derive(Clone)]
pub struct Collector {
    config: Arc<Config>,
    transmitter: LogTransmitter,
    dispatcher: Dispatcher,
    observer: Arc<dyn DeliveryObserver>,
    stats: Arc<DeliveryStats>,
}

impl Collector {
    pub fn new(config: Config) -> Result<Self, PushLogsError> {
        config.validate()?;
        let client = HttpClient::new(&config)?;

        Ok(Self {
            transmitter: LogTransmitter::new(client),
            dispatcher: Dispatcher::new(config.max_in_flight),
            observer: Arc::new(TracingObserver),
            stats: Arc::new(DeliveryStats::new()),
            config: Arc::new(config),
        })
    }

    /// Replaces the default `tracing` observer.
    pub fn with_observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> DeliverySnapshot {
        self.stats.snapshot()
    }

    /// Builds an entry stamped with the current UTC time and this collector's
    /// identity, then dispatches it.
    pub fn add_log(
        &self,
        trace_id: impl Into<String>,
        level: impl Into<LogLevel>,
        message: impl Into<String>,
    ) {
        let mut entry = LogEntry::new(trace_id, level, message);
        entry.stamp(&self.config.service_id, &self.config.application_id);
        self.dispatch(entry);
    }

    /// Dispatches a caller-built entry. Service and application ids are always
    /// replaced; the timestamp is kept unless empty.
    pub fn add_log_entry(&self, mut entry: LogEntry) {
        entry.stamp(&self.config.service_id, &self.config.application_id);
        self.dispatch(entry);
    }

    pub fn info(&self, trace_id: impl Into<String>, message: impl Into<String>) {
        self.add_log(trace_id, LogLevel::Info, message);
    }

    pub fn error(&self, trace_id: impl Into<String>, message: impl Into<String>) {
        self.add_log(trace_id, LogLevel::Error, message);
    }

    pub fn warning(&self, trace_id: impl Into<String>, message: impl Into<String>) {
        self.add_log(trace_id, LogLevel::Warning, message);
    }

    pub fn debug(&self, trace_id: impl Into<String>, message: impl Into<String>) {
        self.add_log(trace_id, LogLevel::Debug, message);
    }

    fn dispatch(&self, entry: LogEntry) {
        self.stats.record_dispatch();

        let Some(handle) = self.dispatcher.handle() else {
            warn!("pushlogs: no runtime available, log dropped");
            record_outcome(
                &self.stats,
                self.observer.as_ref(),
                &entry,
                Err(TransmissionError::NoRuntime),
            );
            return;
        };

        let transmitter = self.transmitter.clone();
        let observer = Arc::clone(&self.observer);
        let stats = Arc::clone(&self.stats);

        self.dispatcher.spawn_on(&handle, async move {
            let outcome = transmitter.send(&entry).await;
            record_outcome(&stats, observer.as_ref(), &entry, outcome);
        });
    }
}

/// Counts a finished send and hands it to the observer, exactly once per entry.
fn record_outcome(
    stats: &DeliveryStats,
    observer: &dyn DeliveryObserver,
    entry: &LogEntry,
    outcome: Result<TransmissionResult, TransmissionError>,
) {
    match outcome {
        Ok(result) => {
            stats.record_delivery(result.latency);
            observer.on_delivered(entry, &result);
        }
        Err(e) => {
            stats.record_failure();
            observer.on_failure(entry, &e);
        }
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::observer::MockDeliveryObserver;
    use super::*;
    use crate::config::ConfigError;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WAIT: Duration = Duration::from_secs(5);

    fn collector_for(base_url: &str) -> Collector {
        Collector::new(Config::new(base_url, "svc-1", "app-1").unwrap()).unwrap()
    }

    #[test]
    fn test_new_rejects_hand_built_invalid_config() {
        let mut config = Config::new("http://h", "s", "a").unwrap();
        config.service_id.clear();

        let err = Collector::new(config).unwrap_err();
        assert!(matches!(
            err,
            PushLogsError::Config(ConfigError::MissingField("service_id"))
        ));
    }

    #[test]
    fn test_undispatched_entry_is_reported_as_failure() {
        let mut observer = MockDeliveryObserver::new();
        observer.expect_on_delivered().never();
        observer
            .expect_on_failure()
            .withf(|entry, error| {
                entry.trace_id == "stranded" && matches!(error, TransmissionError::NoRuntime)
            })
            .times(1)
            .return_const(());

        let stats = DeliveryStats::new();
        stats.record_dispatch();
        let entry = LogEntry::new("stranded", LogLevel::Error, "m");

        record_outcome(&stats, &observer, &entry, Err(TransmissionError::NoRuntime));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_success_notifies_delivered_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut observer = MockDeliveryObserver::new();
        observer
            .expect_on_delivered()
            .times(1)
            .returning(move |entry, result| {
                let _ = tx.send((entry.trace_id.clone(), result.status_code));
            });
        observer.expect_on_failure().never();

        let collector = collector_for(&server.uri()).with_observer(Arc::new(observer));
        collector.info("trace-1", "hello");

        let (trace_id, status) = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(trace_id, "trace-1");
        assert_eq!(status, 201);

        let stats = collector.stats();
        assert_eq!(stats.dispatched, 1);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn test_rejected_status_notifies_failure_once_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut observer = MockDeliveryObserver::new();
        observer.expect_on_delivered().never();
        observer
            .expect_on_failure()
            .times(1)
            .returning(move |_, error| {
                let _ = tx.send(error.status());
            });

        let collector = collector_for(&server.uri()).with_observer(Arc::new(observer));
        collector.error("trace-2", "boom");

        let status = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(status, Some(503));

        // Give a would-be retry the chance to show up
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
        assert_eq!(collector.stats().failed, 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut observer = MockDeliveryObserver::new();
        observer.expect_on_delivered().never();
        observer
            .expect_on_failure()
            .times(1)
            .returning(move |_, error| {
                let _ = tx.send(matches!(error, TransmissionError::Transport(_)));
            });

        let collector = collector_for("http://127.0.0.1:1").with_observer(Arc::new(observer));
        collector.warning("trace-3", "nobody listening");

        let is_transport = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert!(is_transport);
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logs"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut observer = MockDeliveryObserver::new();
        observer.expect_on_delivered().never();
        observer
            .expect_on_failure()
            .times(1)
            .returning(move |_, error| {
                let _ = tx.send(matches!(error, TransmissionError::Timeout(_)));
            });

        let config = Config::new(server.uri(), "svc-1", "app-1")
            .unwrap()
            .with_timeout(Duration::from_millis(100))
            .unwrap();
        let collector = Collector::new(config)
            .unwrap()
            .with_observer(Arc::new(observer));
        collector.debug("trace-4", "slow");

        let is_timeout = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert!(is_timeout);
    }
}
