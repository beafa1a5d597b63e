// tests/support/builders.rs
use audit_relay::application::ports::log::LogMessage;
use audit_relay::domain::audit::AuditEvent;

pub struct EventBuilder {
    id: String,
    action: String,
    contact_id: Option<String>,
    created_at: String,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: "evt-123".into(),
            action: "edited".into(),
            contact_id: Some("c-456".into()),
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn without_contact(mut self) -> Self {
        self.contact_id = None;
        self
    }

    pub fn build(self) -> AuditEvent {
        AuditEvent::new(self.id, self.action, self.contact_id, self.created_at)
            .expect("builder produces valid events")
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The reference event `{evt-123, edited, c-456, 2024-01-01T00:00:00Z}`.
pub fn sample_event() -> AuditEvent {
    EventBuilder::new().build()
}

pub fn message(offset: i64, payload: Vec<u8>) -> LogMessage {
    LogMessage {
        topic: "audit-events".into(),
        partition: 0,
        offset,
        key: None,
        payload,
    }
}
