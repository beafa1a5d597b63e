// tests/support/mocks/sinks.rs
use async_trait::async_trait;
use audit_relay::application::error::{ArchiveError, IndexError};
use audit_relay::application::ports::sinks::{ObjectStore, SearchIndex};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/* -------------------------------- Journal -------------------------------- */

/// Ordered record of side effects across all doubles sharing it.
#[derive(Clone, Debug, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/* -------------------------------- RecordingIndex -------------------------------- */

#[derive(Default)]
pub struct RecordingIndex {
    documents: Mutex<HashMap<String, serde_json::Value>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    journal: Journal,
}

impl RecordingIndex {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn failing(journal: Journal) -> Self {
        let index = Self::new(journal);
        index.set_failing(true);
        index
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn document(&self, id: &str) -> Option<serde_json::Value> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    pub fn documents(&self) -> HashMap<String, serde_json::Value> {
        self.documents.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    async fn upsert(&self, id: &str, document: &serde_json::Value) -> Result<(), IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            self.journal.push(format!("index-failed:{id}"));
            return Err(IndexError::Status {
                status: 503,
                body: "cluster unavailable".into(),
            });
        }
        self.documents
            .lock()
            .unwrap()
            .insert(id.to_string(), document.clone());
        self.journal.push(format!("index:{id}"));
        Ok(())
    }
}

/* -------------------------------- RecordingStore -------------------------------- */

#[derive(Default)]
pub struct RecordingStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    journal: Journal,
}

impl RecordingStore {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn failing(journal: Journal) -> Self {
        let store = Self::new(journal);
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Body and content type stored at `key`.
    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), ArchiveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            self.journal.push(format!("archive-failed:{key}"));
            return Err(ArchiveError::request("NoSuchBucket"));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, content_type.to_string()));
        self.journal.push(format!("archive:{key}"));
        Ok(())
    }
}
