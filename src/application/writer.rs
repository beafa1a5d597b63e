// src/application/writer.rs
use crate::application::error::{ArchiveError, IndexError};
use crate::application::ports::{EventCodecPort, ObjectStorePort, SearchIndexPort};
use crate::domain::audit::AuditEvent;
use std::{fmt, str::FromStr, sync::Arc};

/// Representation used for archived objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    /// The schema's binary wire form.
    #[default]
    Avro,
    /// The same JSON projection that is sent to the search index.
    Json,
}

impl ArchiveFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Avro => "avro",
            ArchiveFormat::Json => "json",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            ArchiveFormat::Avro => "avro/binary",
            ArchiveFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "avro" => Ok(ArchiveFormat::Avro),
            "json" => Ok(ArchiveFormat::Json),
            other => Err(format!("unknown archive format `{other}` (expected avro or json)")),
        }
    }
}

/// Outcome of writing one event to both sinks. Each side is independent.
#[derive(Debug)]
pub struct WriteReport {
    pub index: Result<(), IndexError>,
    /// The object key on success.
    pub archive: Result<String, ArchiveError>,
}

/// Writes decoded events to the search index and the archive store.
pub struct DualSinkWriter {
    index: Arc<SearchIndexPort>,
    store: Arc<ObjectStorePort>,
    codec: Arc<EventCodecPort>,
    format: ArchiveFormat,
    key_prefix: String,
}

impl DualSinkWriter {
    #[must_use]
    pub fn new(
        index: Arc<SearchIndexPort>,
        store: Arc<ObjectStorePort>,
        codec: Arc<EventCodecPort>,
        format: ArchiveFormat,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            index,
            store,
            codec,
            format,
            key_prefix: key_prefix.into(),
        }
    }

    /// Upsert the event's JSON projection under its id.
    ///
    /// # Errors
    ///
    /// Propagates the [`IndexError`] reported by the search index.
    pub async fn index_document(&self, event: &AuditEvent) -> Result<(), IndexError> {
        let document =
            serde_json::to_value(event).map_err(|err| IndexError::Serialize(err.to_string()))?;
        self.index.upsert(event.document_id(), &document).await
    }

    /// Store the event at its deterministic key and return that key.
    ///
    /// # Errors
    ///
    /// Propagates the [`ArchiveError`] from encoding or from the object store.
    pub async fn archive_object(&self, event: &AuditEvent) -> Result<String, ArchiveError> {
        let key = self.archive_key(event);
        let body = self.archive_body(event)?;
        self.store
            .put(&key, body, self.format.content_type())
            .await?;
        Ok(key)
    }

    #[must_use]
    pub fn archive_key(&self, event: &AuditEvent) -> String {
        event.archive_key(&self.key_prefix, self.format.extension())
    }

    /// # Errors
    ///
    /// Returns [`ArchiveError`] when the event cannot be serialized in the
    /// configured format.
    pub fn archive_body(&self, event: &AuditEvent) -> Result<Vec<u8>, ArchiveError> {
        match self.format {
            ArchiveFormat::Avro => Ok(self.codec.encode(event)?),
            ArchiveFormat::Json => {
                serde_json::to_vec(event).map_err(|err| ArchiveError::Serialize(err.to_string()))
            }
        }
    }

    /// Attempt both sinks; a failure on one never skips the other.
    pub async fn write(&self, event: &AuditEvent) -> WriteReport {
        let index = self.index_document(event).await;
        let archive = self.archive_object(event).await;
        WriteReport { index, archive }
    }
}
