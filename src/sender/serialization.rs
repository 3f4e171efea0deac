use crate::domain::LogEntry;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Encodes one entry as the JSON object the endpoint expects.
pub fn serialize_entry(entry: &LogEntry) -> Result<Vec<u8>, SerializationError> {
    Ok(serde_json::to_vec(entry)?)
}
