use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity of a shipped log entry.
///
/// The four fixed levels map to the upper-case strings the collection
/// endpoint expects. Any other string is carried through verbatim as
/// `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Info,
    Error,
    Warning,
    Debug,
    Custom(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Debug => "DEBUG",
            LogLevel::Custom(level) => level,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LogLevel {
    fn from(level: String) -> Self {
        match level.as_str() {
            "INFO" => LogLevel::Info,
            "ERROR" => LogLevel::Error,
            "WARNING" => LogLevel::Warning,
            "DEBUG" => LogLevel::Debug,
            _ => LogLevel::Custom(level),
        }
    }
}

impl From<&str> for LogLevel {
    fn from(level: &str) -> Self {
        LogLevel::from(level.to_string())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Custom(level) => level,
            fixed => fixed.as_str().to_string(),
        }
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogLevel::from(s))
    }
}
