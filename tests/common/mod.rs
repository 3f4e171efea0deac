#![allow(dead_code)]

use pushlogs::{DeliveryObserver, LogEntry, TransmissionError, TransmissionResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use wiremock::MockServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

pub const WAIT: Duration = Duration::from_secs(5);

/// What a send task reported back.
#[derive(Debug)]
pub enum Outcome {
    Delivered { trace_id: String, status: u16 },
    Failed { trace_id: String, error: String, status: Option<u16> },
}

/// Observer forwarding every outcome over a channel so tests can await sends.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<Outcome>,
}

impl ChannelObserver {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Outcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl DeliveryObserver for ChannelObserver {
    fn on_delivered(&self, entry: &LogEntry, result: &TransmissionResult) {
        let _ = self.tx.send(Outcome::Delivered {
            trace_id: entry.trace_id.clone(),
            status: result.status_code,
        });
    }

    fn on_failure(&self, entry: &LogEntry, error: &TransmissionError) {
        let _ = self.tx.send(Outcome::Failed {
            trace_id: entry.trace_id.clone(),
            error: error.to_string(),
            status: error.status(),
        });
    }
}

pub async fn next_outcome(rx: &mut mpsc::UnboundedReceiver<Outcome>) -> Outcome {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for a send outcome")
        .expect("observer channel closed")
}

/// Mock server answering every `POST /logs` with `status`.
pub async fn logs_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Polls until the server has seen `count` requests, then returns their JSON bodies.
pub async fn wait_for_bodies(server: &MockServer, count: usize) -> Vec<Value> {
    let deadline = Instant::now() + WAIT;
    loop {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests
                .iter()
                .map(|request| serde_json::from_slice(&request.body).expect("body is JSON"))
                .collect();
        }
        assert!(
            Instant::now() < deadline,
            "expected {count} requests, saw {}",
            requests.len()
        );
        sleep(Duration::from_millis(10)).await;
    }
}

/// Lets stray sends land before counting requests.
pub async fn settle() {
    sleep(Duration::from_millis(150)).await;
}
