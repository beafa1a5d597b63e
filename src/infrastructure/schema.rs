// src/infrastructure/schema.rs
use apache_avro::Schema;
use apache_avro::schema::RecordSchema;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read schema {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("schema {origin} does not describe an audit event: {message}")]
    Shape { origin: String, message: String },
}

#[derive(Debug, Clone, Copy)]
enum FieldType {
    String,
    OptionalString,
}

const AUDIT_EVENT_FIELDS: [(&str, FieldType); 4] = [
    ("id", FieldType::String),
    ("action", FieldType::String),
    ("contactId", FieldType::OptionalString),
    ("createdAt", FieldType::String),
];

/// The parsed audit event schema. Loaded once at startup and shared
/// read-only by every codec user.
#[derive(Debug, Clone)]
pub struct AuditSchema {
    schema: Schema,
}

impl AuditSchema {
    /// # Errors
    ///
    /// Returns a [`SchemaLoadError`] when the file cannot be read, does not parse
    /// as Avro, or does not have the audit event field set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let definition = fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            origin: origin.clone(),
            source,
        })?;
        Self::parse_from(&definition, origin)
    }

    /// # Errors
    ///
    /// Returns a [`SchemaLoadError`] when `definition` does not parse or has the
    /// wrong shape.
    pub fn parse(definition: &str) -> Result<Self, SchemaLoadError> {
        Self::parse_from(definition, "<inline>".to_string())
    }

    fn parse_from(definition: &str, origin: String) -> Result<Self, SchemaLoadError> {
        let schema = Schema::parse_str(definition).map_err(|err| SchemaLoadError::Parse {
            origin: origin.clone(),
            message: err.to_string(),
        })?;

        check_shape(&schema).map_err(|message| SchemaLoadError::Shape { origin, message })?;

        Ok(Self { schema })
    }

    #[must_use]
    pub fn avro(&self) -> &Schema {
        &self.schema
    }
}

fn check_shape(schema: &Schema) -> Result<(), String> {
    let Schema::Record(RecordSchema { fields, .. }) = schema else {
        return Err("top-level type must be a record".into());
    };

    if fields.len() != AUDIT_EVENT_FIELDS.len() {
        return Err(format!(
            "expected {} fields, found {}",
            AUDIT_EVENT_FIELDS.len(),
            fields.len()
        ));
    }

    for (name, expected) in AUDIT_EVENT_FIELDS {
        let field = fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| format!("missing field `{name}`"))?;

        if !field_matches(&field.schema, expected) {
            return Err(format!("field `{name}` must be {expected:?}"));
        }
    }

    Ok(())
}

fn field_matches(schema: &Schema, expected: FieldType) -> bool {
    match expected {
        FieldType::String => matches!(schema, Schema::String),
        FieldType::OptionalString => match schema {
            Schema::Union(union) => {
                let variants = union.variants();
                variants.len() == 2
                    && variants.iter().any(|v| matches!(v, Schema::Null))
                    && variants.iter().any(|v| matches!(v, Schema::String))
            }
            _ => false,
        },
    }
}
