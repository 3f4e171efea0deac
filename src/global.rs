//! Process-wide collector and the severity shorthands that log through it.
//!
//! Nothing here is required: applications can own a [`Collector`] and pass it
//! around. Until [`init`] (or [`install`]) succeeds, every logging function in
//! this module is a silent no-op.

use crate::collector::Collector;
use crate::config::Config;
use crate::domain::{LogEntry, LogLevel, PushLogsError};
use parking_lot::{RwLock, const_rwlock};

static DEFAULT_COLLECTOR: RwLock<Option<Collector>> = const_rwlock(None);

/// Builds the process-wide collector with the default 15 second timeout,
/// replacing any earlier one. On error the current collector is untouched.
pub fn init(base_url: &str, service_id: &str, application_id: &str) -> Result<(), PushLogsError> {
    let collector = Collector::new(Config::new(base_url, service_id, application_id)?)?;
    install(collector);
    Ok(())
}

/// Like [`init`], reading the config from `PUSHLOGS_*` environment variables.
pub fn init_from_env() -> Result<(), PushLogsError> {
    let collector = Collector::new(Config::from_env()?)?;
    install(collector);
    Ok(())
}

/// Makes `collector` the process-wide one, returning the previous collector.
pub fn install(collector: Collector) -> Option<Collector> {
    DEFAULT_COLLECTOR.write().replace(collector)
}

/// The current process-wide collector, if initialized.
pub fn collector() -> Option<Collector> {
    DEFAULT_COLLECTOR.read().clone()
}

pub fn is_initialized() -> bool {
    DEFAULT_COLLECTOR.read().is_some()
}

pub fn log(trace_id: &str, level: impl Into<LogLevel>, message: &str) {
    if let Some(collector) = collector() {
        collector.add_log(trace_id, level, message);
    }
}

pub fn add_log_entry(entry: LogEntry) {
    if let Some(collector) = collector() {
        collector.add_log_entry(entry);
    }
}

pub fn info(trace_id: &str, message: &str) {
    log(trace_id, LogLevel::Info, message);
}

pub fn error(trace_id: &str, message: &str) {
    log(trace_id, LogLevel::Error, message);
}

pub fn warning(trace_id: &str, message: &str) {
    log(trace_id, LogLevel::Warning, message);
}

pub fn debug(trace_id: &str, message: &str) {
    log(trace_id, LogLevel::Debug, message);
}
