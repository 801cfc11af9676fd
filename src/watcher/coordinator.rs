//! Debounced, non-overlapping regeneration driven by page events.
//!
//! ```text
//! Idle --event--> DebouncePending --deadline--> Regenerating --done--> Idle
//!                   ^     |                         |
//!                   +-----+ event resets deadline   +-- events keep arriving,
//!                                                       next run waits for this one
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use super::debouncer::Debouncer;
use super::event::PageEvent;
use crate::error::RouteGenResult;
use crate::regen::{RegenOutcome, Regenerate};

/// Counters reported when the coordinator stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Page events received.
    pub events: usize,
    /// Runs that completed (written or unchanged).
    pub regenerations: usize,
    /// Runs that failed.
    pub failures: usize,
    /// Runs refused by the re-entrancy guard.
    pub skipped: usize,
}

type InFlight = JoinHandle<RouteGenResult<RegenOutcome>>;

/// Turns a stream of page events into regeneration runs.
pub struct WatchCoordinator<R: Regenerate> {
    regenerator: Arc<R>,
    debounce_ms: u64,
    cancel: CancellationToken,
}

impl<R: Regenerate> WatchCoordinator<R> {
    pub fn new(regenerator: Arc<R>, debounce_ms: u64) -> Self {
        Self {
            regenerator,
            debounce_ms,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop when `token` is cancelled instead of an internal token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops [`run`](Self::run) when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Process events until cancelled, or until the channel closes and
    /// all pending work is done.
    pub async fn run(self, mut events: mpsc::Receiver<PageEvent>) -> WatchSummary {
        let mut summary = WatchSummary::default();
        let mut debouncer = Debouncer::new(self.debounce_ms);
        let mut in_flight: Option<InFlight> = None;
        let mut channel_open = true;

        crate::log_event!("watcher", "started", "debounce: {}ms", self.debounce_ms);

        loop {
            if !channel_open && in_flight.is_none() && !debouncer.has_pending() {
                crate::debug_event!("watcher", "event channel closed");
                break;
            }

            let deadline = debouncer.deadline();
            let wake_at = deadline.unwrap_or_else(far_future);

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    if let Some(handle) = in_flight.take() {
                        crate::debug_event!("watcher", "waiting for in-flight run");
                        record_outcome(&mut summary, handle.await);
                    }
                    break;
                }

                maybe_event = events.recv(), if channel_open => match maybe_event {
                    Some(event) => {
                        crate::debug_event!(
                            "watcher",
                            "event",
                            "{:?} {}",
                            event.kind,
                            event.path.display()
                        );
                        summary.events += 1;
                        debouncer.record(event.path);
                    }
                    None => channel_open = false,
                },

                result = async {
                    match in_flight.as_mut() {
                        Some(handle) => handle.await,
                        None => std::future::pending().await,
                    }
                }, if in_flight.is_some() => {
                    in_flight = None;
                    record_outcome(&mut summary, result);
                }

                _ = sleep_until(wake_at), if deadline.is_some() && in_flight.is_none() => {
                    let batch = debouncer.take_ready();
                    if !batch.is_empty() {
                        crate::log_event!(
                            "watcher",
                            "regenerating",
                            "{} changed page(s)",
                            batch.len()
                        );
                        let regenerator = Arc::clone(&self.regenerator);
                        let handle = tokio::task::spawn_blocking(move || regenerator.regenerate());
                        in_flight = Some(handle);
                    }
                }
            }
        }

        summary
    }
}

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400)
}

fn record_outcome(
    summary: &mut WatchSummary,
    result: Result<RouteGenResult<RegenOutcome>, tokio::task::JoinError>,
) {
    match result {
        Ok(Ok(RegenOutcome::Skipped)) => summary.skipped += 1,
        Ok(Ok(_)) => summary.regenerations += 1,
        Ok(Err(e)) => {
            summary.failures += 1;
            tracing::error!("[watcher] regeneration failed: {e}");
        }
        Err(e) => {
            summary.failures += 1;
            tracing::error!("[watcher] regeneration task failed: {e}");
        }
    }
}
