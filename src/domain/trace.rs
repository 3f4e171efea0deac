use uuid::Uuid;

/// Generates a fresh opaque trace id for callers that have none.
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}
