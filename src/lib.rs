// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Millisecond latencies fit in u64
    clippy::missing_errors_doc,       // Error enums document themselves
    clippy::module_name_repetitions,  // e.g. ConfigError in config module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::doc_markdown
)]

//! Fire-and-forget structured log shipping.
//!
//! ```no_run
//! pushlogs::init("https://logs.example.com", "svc-1", "app-1")?;
//! pushlogs::info("trace-42", "started");
//! # Ok::<(), pushlogs::PushLogsError>(())
//! ```
//!
//! Each call posts one JSON entry to `{base_url}/logs` on its own task and
//! returns at once. Delivery is best-effort: failures are reported to the
//! collector's [`DeliveryObserver`] and never to the caller.

pub mod collector;
pub mod config;
pub mod domain;
pub mod global;
pub mod logging;
pub mod sender;

// Re-export main types for easy access
pub use collector::{Collector, DeliveryObserver, DeliverySnapshot, TracingObserver};
pub use config::{Config, ConfigError};
pub use domain::{LogEntry, LogLevel, PushLogsError, new_trace_id};
pub use global::{
    add_log_entry, collector as global_collector, debug, error, info, init, init_from_env,
    install, is_initialized, log, warning,
};
pub use sender::{TransmissionError, TransmissionResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
