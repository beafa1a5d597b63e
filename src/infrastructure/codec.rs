// src/infrastructure/codec.rs
use crate::application::error::{DecodeError, EncodeError};
use crate::application::ports::codec::EventCodec;
use crate::domain::audit::AuditEvent;
use crate::infrastructure::schema::AuditSchema;
use apache_avro::types::Value;
use std::sync::Arc;

/// Raw Avro datum codec (no container header, no schema-id prefix).
#[derive(Debug, Clone)]
pub struct AvroEventCodec {
    schema: Arc<AuditSchema>,
}

impl AvroEventCodec {
    #[must_use]
    pub fn new(schema: Arc<AuditSchema>) -> Self {
        Self { schema }
    }
}

impl EventCodec for AvroEventCodec {
    fn encode(&self, event: &AuditEvent) -> Result<Vec<u8>, EncodeError> {
        event.validate()?;

        let contact_id = match &event.contact_id {
            Some(contact_id) => Value::Union(1, Box::new(Value::String(contact_id.clone()))),
            None => Value::Union(0, Box::new(Value::Null)),
        };
        let record = Value::Record(vec![
            ("id".into(), Value::String(event.id.clone())),
            ("action".into(), Value::String(event.action.clone())),
            ("contactId".into(), contact_id),
            ("createdAt".into(), Value::String(event.created_at.clone())),
        ]);

        // resolving fixes up the union branch index for the loaded schema
        let schema = self.schema.avro();
        let resolved = record
            .resolve(schema)
            .map_err(|err| EncodeError::Avro(err.to_string()))?;
        apache_avro::to_avro_datum(schema, resolved).map_err(|err| EncodeError::Avro(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<AuditEvent, DecodeError> {
        let mut remaining = bytes;
        let value = apache_avro::from_avro_datum(self.schema.avro(), &mut remaining, None)
            .map_err(|err| DecodeError::Malformed(err.to_string()))?;

        if !remaining.is_empty() {
            return Err(DecodeError::TrailingBytes(remaining.len()));
        }

        event_from_value(value)
    }
}

fn event_from_value(value: Value) -> Result<AuditEvent, DecodeError> {
    let Value::Record(fields) = value else {
        return Err(DecodeError::Shape("expected a record".into()));
    };

    let mut id = None;
    let mut action = None;
    let mut contact_id = None;
    let mut created_at = None;

    for (name, value) in fields {
        match name.as_str() {
            "id" => id = Some(string_field(&name, value)?),
            "action" => action = Some(string_field(&name, value)?),
            "contactId" => contact_id = Some(optional_string_field(&name, value)?),
            "createdAt" => created_at = Some(string_field(&name, value)?),
            other => return Err(DecodeError::Shape(format!("unexpected field `{other}`"))),
        }
    }

    let missing = |name: &str| DecodeError::Shape(format!("missing field `{name}`"));
    let event = AuditEvent::new(
        id.ok_or_else(|| missing("id"))?,
        action.ok_or_else(|| missing("action"))?,
        contact_id.ok_or_else(|| missing("contactId"))?,
        created_at.ok_or_else(|| missing("createdAt"))?,
    )?;
    Ok(event)
}

fn string_field(name: &str, value: Value) -> Result<String, DecodeError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(DecodeError::Shape(format!(
            "field `{name}` must be a string, got {other:?}"
        ))),
    }
}

fn optional_string_field(name: &str, value: Value) -> Result<Option<String>, DecodeError> {
    let inner = match value {
        Value::Union(_, inner) => *inner,
        other => other,
    };
    match inner {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(DecodeError::Shape(format!(
            "field `{name}` must be null or a string, got {other:?}"
        ))),
    }
}
