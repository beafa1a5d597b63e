// src/application/pipeline/policy.rs
use crate::application::error::{ArchiveError, DecodeError, IndexError, ReadError};
use std::fmt;

/// What the driver does after a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Go back to reading; the log still owns the position.
    RetryRead,
    /// Treat the message as consumed without writing it anywhere.
    SkipMessage,
    /// Count and log the failure, then carry on with the same message.
    RecordAndContinue,
    /// Leave the loop.
    Stop,
}

#[derive(Debug)]
pub enum StageError {
    Read(ReadError),
    Decode(DecodeError),
    Index(IndexError),
    Archive(ArchiveError),
}

impl StageError {
    #[must_use]
    pub fn disposition(&self) -> Disposition {
        match self {
            StageError::Read(ReadError::Cancelled) => Disposition::Stop,
            StageError::Read(ReadError::Acknowledge(_)) => Disposition::RecordAndContinue,
            StageError::Read(ReadError::Receive(_)) => Disposition::RetryRead,
            // a payload that failed once fails on every replay
            StageError::Decode(_) => Disposition::SkipMessage,
            StageError::Index(_) | StageError::Archive(_) => Disposition::RecordAndContinue,
        }
    }

    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            StageError::Read(ReadError::Acknowledge(_)) => "acknowledge",
            StageError::Read(_) => "read",
            StageError::Decode(_) => "decode",
            StageError::Index(_) => "index",
            StageError::Archive(_) => "archive",
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::Read(err) => write!(f, "{err}"),
            StageError::Decode(err) => write!(f, "{err}"),
            StageError::Index(err) => write!(f, "{err}"),
            StageError::Archive(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StageError {}
