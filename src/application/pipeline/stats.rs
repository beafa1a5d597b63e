// src/application/pipeline/stats.rs
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the driver and the status surface.
#[derive(Debug, Default)]
pub struct PipelineStats {
    received: AtomicU64,
    decoded: AtomicU64,
    dropped: AtomicU64,
    indexed: AtomicU64,
    archived: AtomicU64,
    index_failures: AtomicU64,
    archive_failures: AtomicU64,
    read_errors: AtomicU64,
    acknowledge_errors: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub received: u64,
    pub decoded: u64,
    pub dropped: u64,
    pub indexed: u64,
    pub archived: u64,
    pub index_failures: u64,
    pub archive_failures: u64,
    pub read_errors: u64,
    pub acknowledge_errors: u64,
}

impl PipelineStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            received: AtomicU64::new(0),
            decoded: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            indexed: AtomicU64::new(0),
            archived: AtomicU64::new(0),
            index_failures: AtomicU64::new(0),
            archive_failures: AtomicU64::new(0),
            read_errors: AtomicU64::new(0),
            acknowledge_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn message_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn message_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn message_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn document_indexed(&self) {
        self.indexed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn object_archived(&self) {
        self.archived.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn index_failed(&self) {
        self.index_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn archive_failed(&self) {
        self.archive_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn read_failed(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn acknowledge_failed(&self) {
        self.acknowledge_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            indexed: self.indexed.load(Ordering::Relaxed),
            archived: self.archived.load(Ordering::Relaxed),
            index_failures: self.index_failures.load(Ordering::Relaxed),
            archive_failures: self.archive_failures.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            acknowledge_errors: self.acknowledge_errors.load(Ordering::Relaxed),
        }
    }
}
