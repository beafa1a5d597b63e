// src/infrastructure/kafka.rs
use crate::application::error::{PublishError, ReadError};
use crate::application::ports::log::{EventPublisher, LogMessage, LogReader};
use async_trait::async_trait;
use rdkafka::{
    ClientConfig, Message,
    consumer::{Consumer, StreamConsumer},
    error::KafkaResult,
    producer::{FutureProducer, FutureRecord},
    util::Timeout,
};
use std::time::Duration;

const MAX_FETCH_BYTES: &str = "10000000";
const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

/// Consumer-group reader over one topic.
///
/// Auto-commit stays on but offsets are only stored when the pipeline
/// acknowledges a message, so a crash mid-message replays it.
pub struct KafkaLogReader {
    consumer: StreamConsumer,
}

impl KafkaLogReader {
    /// # Errors
    ///
    /// Returns the client error when the consumer cannot be created or subscribed.
    pub fn new(brokers: &str, group_id: &str, topic: &str) -> KafkaResult<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("auto.offset.reset", "earliest")
            .set("enable.auto.commit", "true")
            .set("enable.auto.offset.store", "false")
            .set("fetch.min.bytes", "1")
            .set("fetch.max.bytes", MAX_FETCH_BYTES)
            .create()?;

        consumer.subscribe(&[topic])?;
        tracing::info!(brokers, group_id, topic, "kafka consumer subscribed");

        Ok(Self { consumer })
    }
}

#[async_trait]
impl LogReader for KafkaLogReader {
    async fn next(&self) -> Result<LogMessage, ReadError> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|err| ReadError::Receive(err.to_string()))?;

        Ok(LogMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message.key().map(<[u8]>::to_vec),
            payload: message.payload().map(<[u8]>::to_vec).unwrap_or_default(),
        })
    }

    async fn acknowledge(&self, message: &LogMessage) -> Result<(), ReadError> {
        // the stored offset is the next one to read
        self.consumer
            .store_offset(&message.topic, message.partition, message.offset + 1)
            .map_err(|err| ReadError::Acknowledge(err.to_string()))
    }
}

pub struct KafkaEventPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaEventPublisher {
    /// # Errors
    ///
    /// Returns the client error when the producer cannot be created.
    pub fn new(brokers: &str, topic: impl Into<String>) -> KafkaResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self {
            producer,
            topic: topic.into(),
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);
        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(PUBLISH_TIMEOUT))
            .await
            .map_err(|(err, _)| PublishError::Delivery(err.to_string()))?;

        tracing::debug!(topic = %self.topic, partition, offset, "message delivered");
        Ok(())
    }
}
