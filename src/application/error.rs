// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("avro encoding failed: {0}")]
    Avro(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not a valid avro datum: {0}")]
    Malformed(String),

    #[error("{0} trailing bytes after avro datum")]
    TrailingBytes(usize),

    #[error("decoded value does not match the audit event shape: {0}")]
    Shape(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to receive message: {0}")]
    Receive(String),

    #[error("failed to acknowledge message: {0}")]
    Acknowledge(String),

    #[error("read cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("index request failed: {0}")]
    Request(String),

    #[error("index rejected document with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to serialize archive body: {0}")]
    Serialize(String),

    #[error("object store request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

impl IndexError {
    #[must_use]
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}

impl ArchiveError {
    #[must_use]
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}
