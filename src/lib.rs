//! Audit event relay.
//!
//! Pulls Avro-encoded [`AuditEvent`](domain::audit::AuditEvent)s from a
//! Kafka consumer group and writes each one to an OpenSearch index and an
//! S3 archive. Sink failures are logged and counted, never retried.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
