//! Progress reporting support.
//!
//! This module provides [`ProgressCallback`] for monitoring long-running
//! operations and [`ProgressInfo`] for progress snapshots. Callbacks fire at
//! a cadence controlled by
//! [`PackOptions::with_batch_size`](crate::PackOptions::with_batch_size).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ugoira_pack::{PackError, PackOptions, ProgressCallback, ProgressInfo, pack_file};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.operation);
//!         }
//!     }
//! }
//!
//! let options = PackOptions::new().with_progress(Arc::new(PrintProgress));
//! let outcome = pack_file("input.mp4", ".", &options)?;
//! # Ok::<(), PackError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of operation currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding the video and emitting sampled frames.
    FrameSampling,
    /// Writing encoded frames into the ZIP archive.
    ArchiveAssembly,
}

/// A snapshot of operation progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items (frames) have been processed so far.
    pub current: u64,
    /// Total items expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
}

/// Trait for receiving progress updates.
///
/// Implementations must be [`Send`] and [`Sync`]; the callback is shared via
/// [`Arc`] and may outlive the call site.
///
/// Progress callbacks are **infallible** — they observe but cannot halt the
/// operation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during a pack operation.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that batches callback invocations.
///
/// Fires every `batch_size` items and always on the final item.
pub(crate) struct ProgressTracker {
    operation: OperationType,
    total: Option<u64>,
    batch_size: u64,
    callback: Arc<dyn ProgressCallback>,
    started: Instant,
    current: u64,
}

impl ProgressTracker {
    pub(crate) fn new(
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
        callback: Arc<dyn ProgressCallback>,
    ) -> Self {
        Self {
            operation,
            total,
            batch_size: batch_size.max(1),
            callback,
            started: Instant::now(),
            current: 0,
        }
    }

    /// Record one completed item, firing the callback when the batch fills
    /// or the total is reached.
    pub(crate) fn record(&mut self) {
        self.current += 1;
        let is_last = self.total.is_some_and(|total| self.current >= total);
        if self.current % self.batch_size != 0 && !is_last {
            return;
        }

        let percentage = self
            .total
            .filter(|total| *total > 0)
            .map(|total| (self.current as f32 / total as f32) * 100.0);

        self.callback.on_progress(&ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed: self.started.elapsed(),
        });
    }
}
