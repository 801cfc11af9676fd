//! Shared debouncing for page change events.
//!
//! Editors often write a file several times per save (auto-save, formatting),
//! and moving a folder of pages produces one event per file. All of them
//! share one quiet period: every event pushes the single deadline forward,
//! and the whole batch becomes ready once nothing arrived for `duration`.

use indexmap::IndexSet;
use std::path::PathBuf;
use tokio::time::{Duration, Instant};

/// Collects changed paths behind one shared deadline.
#[derive(Debug)]
pub struct Debouncer {
    /// Paths seen since the last batch, first occurrence order.
    pending: IndexSet<PathBuf>,
    /// When the current batch becomes ready.
    deadline: Option<Instant>,
    /// Required quiet period.
    duration: Duration,
}

impl Debouncer {
    /// Create a new debouncer with the given duration in milliseconds.
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: IndexSet::new(),
            deadline: None,
            duration: Duration::from_millis(debounce_ms),
        }
    }

    /// Record a change and restart the quiet period.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path);
        self.deadline = Some(Instant::now() + self.duration);
    }

    /// When the pending batch becomes ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_ready(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Take the whole batch once the quiet period has passed.
    ///
    /// Returns an empty batch (and keeps pending paths) otherwise.
    pub fn take_ready(&mut self) -> Vec<PathBuf> {
        if !self.is_ready() {
            return Vec::new();
        }
        self.deadline = None;
        self.pending.drain(..).collect()
    }

    /// Check if there are any pending changes.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
