pub mod client;
pub mod serialization;
pub mod transmission;

pub use client::{ClientError, HttpClient};
pub use serialization::{SerializationError, serialize_entry};
pub use transmission::{LogTransmitter, TransmissionError, TransmissionResult};
