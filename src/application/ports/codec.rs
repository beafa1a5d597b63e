// src/application/ports/codec.rs
use crate::application::error::{DecodeError, EncodeError};
use crate::domain::audit::AuditEvent;

/// Binary wire codec bound to one parsed schema for its whole lifetime.
pub trait EventCodec: Send + Sync {
    fn encode(&self, event: &AuditEvent) -> Result<Vec<u8>, EncodeError>;
    fn decode(&self, bytes: &[u8]) -> Result<AuditEvent, DecodeError>;
}
