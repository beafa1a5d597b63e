// src/application/ports/sinks.rs
use crate::application::error::{ArchiveError, IndexError};
use async_trait::async_trait;

#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Create or replace the document stored under `id`.
    async fn upsert(&self, id: &str, document: &serde_json::Value) -> Result<(), IndexError>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` at `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ArchiveError>;
}
