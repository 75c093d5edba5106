use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operation counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub books_listed: Arc<AtomicU64>,
    pub books_created: Arc<AtomicU64>,
    pub books_updated: Arc<AtomicU64>,
    pub books_toggled: Arc<AtomicU64>,
    pub books_deleted: Arc<AtomicU64>,
    pub not_found: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            books_listed: Arc::new(AtomicU64::new(0)),
            books_created: Arc::new(AtomicU64::new(0)),
            books_updated: Arc::new(AtomicU64::new(0)),
            books_toggled: Arc::new(AtomicU64::new(0)),
            books_deleted: Arc::new(AtomicU64::new(0)),
            not_found: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Counts a successful read response.
    pub fn inc_listed(&self) {
        self.books_listed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_created(&self) {
        self.books_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_updated(&self) {
        self.books_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_toggled(&self) {
        self.books_toggled.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds the number of rows removed by a delete statement.
    pub fn add_deleted(&self, rows: u64) {
        self.books_deleted.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn inc_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_listed: self.books_listed.load(Ordering::Relaxed),
            books_created: self.books_created.load(Ordering::Relaxed),
            books_updated: self.books_updated.load(Ordering::Relaxed),
            books_toggled: self.books_toggled.load(Ordering::Relaxed),
            books_deleted: self.books_deleted.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub books_listed: u64,
    pub books_created: u64,
    pub books_updated: u64,
    pub books_toggled: u64,
    pub books_deleted: u64,
    pub not_found: u64,
    pub uptime_seconds: u64,
}

/// One exported value with its exposition metadata.
pub struct Series {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: &'static str,
    pub value: u64,
}

impl MetricsSnapshot {
    pub fn series(&self) -> [Series; 7] {
        let counter =
            |name: &'static str, help: &'static str, value: u64| Series { name, help, kind: "counter", value };
        [
            counter("books_listed", "Successful read responses", self.books_listed),
            counter("books_created", "Books created", self.books_created),
            counter("books_updated", "Updates that touched a row", self.books_updated),
            counter("books_toggled", "Return status toggles that touched a row", self.books_toggled),
            counter("books_deleted", "Rows deleted", self.books_deleted),
            counter("not_found", "Requests answered with 404", self.not_found),
            Series { name: "uptime_seconds", help: "Seconds since start", kind: "gauge", value: self.uptime_seconds },
        ]
    }
}
