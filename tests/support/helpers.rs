// tests/support/helpers.rs
use super::mocks::{Journal, RecordingIndex, RecordingStore, ScriptedLogReader};
use audit_relay::application::error::ReadError;
use audit_relay::application::pipeline::{PipelineContext, PipelineDriver, PipelineStats};
use audit_relay::application::ports::codec::EventCodec;
use audit_relay::application::ports::log::LogMessage;
use audit_relay::application::writer::{ArchiveFormat, DualSinkWriter};
use audit_relay::infrastructure::{codec::AvroEventCodec, schema::AuditSchema};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const SCHEMA_PATH: &str = "schema/audit_event.avsc";

pub fn codec() -> Arc<AvroEventCodec> {
    let schema = AuditSchema::load(SCHEMA_PATH).expect("shipped schema loads");
    Arc::new(AvroEventCodec::new(Arc::new(schema)))
}

/// A pipeline wired to in-memory doubles that all share one journal.
pub struct TestPipeline {
    pub driver: PipelineDriver,
    pub reader: Arc<ScriptedLogReader>,
    pub index: Arc<RecordingIndex>,
    pub store: Arc<RecordingStore>,
    pub codec: Arc<AvroEventCodec>,
    pub journal: Journal,
    pub cancel: CancellationToken,
}

pub struct TestPipelineBuilder {
    script: Vec<Result<LogMessage, ReadError>>,
    index_failing: bool,
    store_failing: bool,
    ack_failing: bool,
    format: ArchiveFormat,
}

impl TestPipelineBuilder {
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
            index_failing: false,
            store_failing: false,
            ack_failing: false,
            format: ArchiveFormat::Avro,
        }
    }

    pub fn read(mut self, result: Result<LogMessage, ReadError>) -> Self {
        self.script.push(result);
        self
    }

    pub fn message(self, message: LogMessage) -> Self {
        self.read(Ok(message))
    }

    pub fn failing_index(mut self) -> Self {
        self.index_failing = true;
        self
    }

    pub fn failing_store(mut self) -> Self {
        self.store_failing = true;
        self
    }

    pub fn failing_ack(mut self) -> Self {
        self.ack_failing = true;
        self
    }

    pub fn format(mut self, format: ArchiveFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> TestPipeline {
        let journal = Journal::new();
        let cancel = CancellationToken::new();
        let codec = codec();

        let reader = Arc::new(ScriptedLogReader::new(
            self.script,
            cancel.clone(),
            journal.clone(),
        ));
        reader.set_ack_failing(self.ack_failing);
        let index = Arc::new(RecordingIndex::new(journal.clone()));
        index.set_failing(self.index_failing);
        let store = Arc::new(RecordingStore::new(journal.clone()));
        store.set_failing(self.store_failing);

        let writer = Arc::new(DualSinkWriter::new(
            index.clone(),
            store.clone(),
            codec.clone(),
            self.format,
            "audit-events",
        ));

        let driver = PipelineDriver::new(PipelineContext {
            reader: reader.clone(),
            codec: codec.clone(),
            writer,
            stats: Arc::new(PipelineStats::new()),
            read_retry_delay: Duration::ZERO,
        });

        TestPipeline {
            driver,
            reader,
            index,
            store,
            codec,
            journal,
            cancel,
        }
    }
}

impl Default for TestPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn encoded(codec: &AvroEventCodec, event: &audit_relay::domain::audit::AuditEvent) -> Vec<u8> {
    codec.encode(event).expect("encode test event")
}
