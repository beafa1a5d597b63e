// src/application/pipeline/driver.rs
use super::policy::{Disposition, StageError};
use super::stats::{PipelineStats, StatsSnapshot};
use crate::application::error::ReadError;
use crate::application::ports::{EventCodecPort, LogReaderPort, log::LogMessage};
use crate::application::writer::{DualSinkWriter, WriteReport};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// Everything the driver needs, built once at startup.
pub struct PipelineContext {
    pub reader: Arc<LogReaderPort>,
    pub codec: Arc<EventCodecPort>,
    pub writer: Arc<DualSinkWriter>,
    pub stats: Arc<PipelineStats>,
    /// Pause after a failed read before pulling again.
    pub read_retry_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The payload decoded and both sinks were attempted.
    Written { indexed: bool, archived: bool },
    /// The payload did not decode and was skipped.
    Dropped,
}

pub struct PipelineDriver {
    ctx: PipelineContext,
}

impl PipelineDriver {
    #[must_use]
    pub fn new(ctx: PipelineContext) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<PipelineStats> {
        Arc::clone(&self.ctx.stats)
    }

    /// Process messages until `cancel` fires. Per-message failures are
    /// logged and counted; only cancellation ends the loop.
    pub async fn run(&self, cancel: CancellationToken) -> StatsSnapshot {
        tracing::info!("pipeline started, waiting for messages");

        while !cancel.is_cancelled() {
            let message = match self.read(&cancel).await {
                Ok(message) => message,
                Err(err) => match self.record(StageError::Read(err), None) {
                    Disposition::Stop => break,
                    _ => {
                        self.pause(&cancel).await;
                        continue;
                    }
                },
            };

            self.process(&message).await;

            if let Err(err) = self.ctx.reader.acknowledge(&message).await {
                self.record(StageError::Read(err), Some(&message));
            }
        }

        let summary = self.ctx.stats.snapshot();
        tracing::info!(
            received = summary.received,
            dropped = summary.dropped,
            indexed = summary.indexed,
            archived = summary.archived,
            "pipeline stopped"
        );
        summary
    }

    async fn read(&self, cancel: &CancellationToken) -> Result<LogMessage, ReadError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ReadError::Cancelled),
            result = self.ctx.reader.next() => result,
        }
    }

    async fn pause(&self, cancel: &CancellationToken) {
        if self.ctx.read_retry_delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(self.ctx.read_retry_delay) => {}
        }
    }

    /// Decode one message and fan it out to both sinks.
    pub async fn process(&self, message: &LogMessage) -> MessageOutcome {
        let stats = &self.ctx.stats;
        stats.message_received();

        let event = match self.ctx.codec.decode(&message.payload) {
            Ok(event) => event,
            Err(err) => {
                self.record(StageError::Decode(err), Some(message));
                return MessageOutcome::Dropped;
            }
        };
        stats.message_decoded();

        let WriteReport { index, archive } = self.ctx.writer.write(&event).await;

        let indexed = match index {
            Ok(()) => {
                stats.document_indexed();
                tracing::info!(event_id = %event.id, "indexed document");
                true
            }
            Err(err) => {
                self.record(StageError::Index(err), Some(message));
                false
            }
        };

        let archived = match archive {
            Ok(key) => {
                stats.object_archived();
                tracing::info!(event_id = %event.id, key = %key, "archived object");
                true
            }
            Err(err) => {
                self.record(StageError::Archive(err), Some(message));
                false
            }
        };

        MessageOutcome::Written { indexed, archived }
    }

    fn record(&self, err: StageError, message: Option<&LogMessage>) -> Disposition {
        let disposition = err.disposition();
        let stats = &self.ctx.stats;
        let (partition, offset) = message
            .map(|m| (m.partition, m.offset))
            .unwrap_or((-1, -1));

        match &err {
            StageError::Read(ReadError::Cancelled) => {
                tracing::debug!("read cancelled");
                return disposition;
            }
            StageError::Read(ReadError::Acknowledge(_)) => stats.acknowledge_failed(),
            StageError::Read(_) => stats.read_failed(),
            StageError::Decode(_) => stats.message_dropped(),
            StageError::Index(_) => stats.index_failed(),
            StageError::Archive(_) => stats.archive_failed(),
        }

        match disposition {
            Disposition::SkipMessage => tracing::warn!(
                stage = err.stage(),
                partition,
                offset,
                error = %err,
                "dropping message"
            ),
            _ => tracing::error!(
                stage = err.stage(),
                partition,
                offset,
                error = %err,
                "pipeline stage failed"
            ),
        }

        disposition
    }
}
