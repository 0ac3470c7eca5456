//! Shared transfer state: the one value both the copy loop and the renderer see.
//!
//! The byte counter is the only mutable field. It is written by the copy loop
//! and read by the renderer with relaxed ordering; the display only needs
//! eventual visibility within one refresh interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::config::MeterConfig;
use crate::render::Snapshot;

/// Progress of a single pass-through transfer.
#[derive(Debug)]
pub struct TransferState {
    bytes_transferred: AtomicU64,
    total_size: i64,
    start_time: Instant,
    refresh_interval: Duration,
    bar_width: usize,
    quiet: bool,
}

impl TransferState {
    /// Create state for a new transfer; the clock starts now.
    pub fn new(cfg: &MeterConfig) -> Self {
        Self::with_start(cfg, Instant::now())
    }

    /// Create state with an explicit start instant (tests pin the clock this way).
    pub fn with_start(cfg: &MeterConfig, start_time: Instant) -> Self {
        Self {
            bytes_transferred: AtomicU64::new(0),
            total_size: cfg.total_size,
            start_time,
            refresh_interval: cfg.refresh_interval,
            bar_width: cfg.bar_width,
            quiet: cfg.quiet,
        }
    }

    /// Record `n` more bytes forwarded. Returns the new running total.
    pub fn add_bytes(&self, n: u64) -> u64 {
        self.bytes_transferred.fetch_add(n, Ordering::Relaxed) + n
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred.load(Ordering::Relaxed)
    }

    /// Declared size; `<= 0` means unknown.
    pub fn total_size(&self) -> i64 {
        self.total_size
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn bar_width(&self) -> usize {
        self.bar_width
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Point-in-time view for the render engine, measured against `now`.
    pub fn snapshot_at(&self, now: Instant) -> Snapshot {
        Snapshot {
            bytes_transferred: self.bytes_transferred(),
            total_size: self.total_size,
            elapsed: now.saturating_duration_since(self.start_time),
            bar_width: self.bar_width,
        }
    }

    /// Point-in-time view measured against the current instant.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(Instant::now())
    }
}
