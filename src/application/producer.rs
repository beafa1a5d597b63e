// src/application/producer.rs
use crate::application::error::PublishError;
use crate::application::ports::{ClockPort, EventCodecPort, EventPublisherPort};
use crate::domain::audit::AuditEvent;
use std::sync::Arc;
use uuid::Uuid;

pub struct NewAuditEvent {
    /// Generated as `evt-<uuid>` when absent.
    pub id: Option<String>,
    pub action: String,
    pub contact_id: Option<String>,
}

/// Stamps, encodes and appends audit events to the log.
pub struct AuditEventProducer {
    codec: Arc<EventCodecPort>,
    publisher: Arc<EventPublisherPort>,
    clock: Arc<ClockPort>,
}

impl AuditEventProducer {
    #[must_use]
    pub fn new(
        codec: Arc<EventCodecPort>,
        publisher: Arc<EventPublisherPort>,
        clock: Arc<ClockPort>,
    ) -> Self {
        Self {
            codec,
            publisher,
            clock,
        }
    }

    /// # Errors
    ///
    /// Returns [`PublishError::Invalid`] for an event that fails validation,
    /// [`PublishError::Encode`] when encoding fails and [`PublishError::Delivery`]
    /// when the broker does not accept the message.
    pub async fn emit(&self, new_event: NewAuditEvent) -> Result<AuditEvent, PublishError> {
        let id = new_event
            .id
            .unwrap_or_else(|| format!("evt-{}", Uuid::new_v4()));
        let event = AuditEvent::recorded_at(
            id,
            new_event.action,
            new_event.contact_id,
            self.clock.now(),
        )?;

        let payload = self.codec.encode(&event)?;
        // keyed by id so one entity's events stay on one partition
        self.publisher.publish(&event.id, &payload).await?;

        tracing::info!(event_id = %event.id, bytes = payload.len(), "published audit event");
        Ok(event)
    }
}
