// tests/support/mocks/log.rs
use super::sinks::Journal;
use async_trait::async_trait;
use audit_relay::application::error::{PublishError, ReadError};
use audit_relay::application::ports::log::{EventPublisher, LogMessage, LogReader};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;

/* -------------------------------- ScriptedLogReader -------------------------------- */

/// Replays a fixed script of reads. Once drained it cancels `on_drained`
/// and then blocks like an idle consumer would.
pub struct ScriptedLogReader {
    script: Mutex<VecDeque<Result<LogMessage, ReadError>>>,
    acknowledged: Mutex<Vec<(i32, i64)>>,
    ack_failing: AtomicBool,
    on_drained: CancellationToken,
    journal: Journal,
}

impl ScriptedLogReader {
    pub fn new(
        script: Vec<Result<LogMessage, ReadError>>,
        on_drained: CancellationToken,
        journal: Journal,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            acknowledged: Mutex::new(Vec::new()),
            ack_failing: AtomicBool::new(false),
            on_drained,
            journal,
        }
    }

    pub fn set_ack_failing(&self, failing: bool) {
        self.ack_failing.store(failing, Ordering::SeqCst);
    }

    pub fn acknowledged(&self) -> Vec<(i32, i64)> {
        self.acknowledged.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl LogReader for ScriptedLogReader {
    async fn next(&self) -> Result<LogMessage, ReadError> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => {
                self.on_drained.cancel();
                std::future::pending().await
            }
        }
    }

    async fn acknowledge(&self, message: &LogMessage) -> Result<(), ReadError> {
        if self.ack_failing.load(Ordering::SeqCst) {
            self.journal.push(format!("ack-failed:{}", message.offset));
            return Err(ReadError::Acknowledge("offset store rejected".into()));
        }
        self.acknowledged
            .lock()
            .unwrap()
            .push((message.partition, message.offset));
        self.journal.push(format!("ack:{}", message.offset));
        Ok(())
    }
}

/* -------------------------------- RecordingPublisher -------------------------------- */

#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    failing: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let publisher = Self::default();
        publisher.failing.store(true, Ordering::SeqCst);
        publisher
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PublishError::Delivery("broker unreachable".into()));
        }
        self.published
            .lock()
            .unwrap()
            .push((key.to_string(), payload.to_vec()));
        Ok(())
    }
}
