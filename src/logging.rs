//! Optional local diagnostics setup for hosts without their own subscriber.
//!
//! Delivery failures are reported through `tracing`; a host that already
//! installs a subscriber does not need anything from this module.

use thiserror::Error;
use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// HTTP stack crates kept at `warn` so per-request chatter stays out of the way.
pub const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create EnvFilter with '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
    #[error("Failed to set global tracing subscriber: {0}")]
    SubscriberInstall(#[from] SetGlobalDefaultError),
}

/// Default level first, then one `target=warn` per quiet target.
pub fn build_filter_string(default_level: Level) -> String {
    let mut filter_parts = Vec::with_capacity(QUIET_TARGETS.len() + 1);
    filter_parts.push(default_level.as_str().to_lowercase());

    for target in QUIET_TARGETS {
        filter_parts.push(format!("{target}=warn"));
    }

    filter_parts.join(",")
}

/// Installs a compact `fmt` subscriber as the global default.
///
/// `RUST_LOG`, when set and valid, takes precedence over `default_level`.
/// Fails if a global subscriber is already installed.
pub fn setup_logging(default_level: Level) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let filter = build_filter_string(default_level);
            EnvFilter::try_new(&filter)
                .map_err(|source| LoggingError::InvalidFilter { filter, source })?
        }
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
