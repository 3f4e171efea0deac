//! Domain layer for pushlogs.
//!
//! Contains the types shared across all modules:
//! - `LogEntry`: one log line as it travels to the collection endpoint
//! - `LogLevel`: severity carried in the `logLevel` wire field
//! - `PushLogsError`: error returned by initialization

pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod trace;

pub use error::PushLogsError;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use trace::new_trace_id;
