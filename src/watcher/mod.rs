//! Watch mode: keep the generated route table in sync with page files.
//!
//! # Architecture
//!
//! ```text
//! FsSubscription
//!   - notify::RecommendedWatcher, recursive per root
//!   - PageEventFilter drops everything but page files
//!         |
//!     mpsc channel of PageEvent
//!         |
//! WatchCoordinator
//!   - shared Debouncer
//!   - one regeneration at a time (spawn_blocking)
//!   - CancellationToken for shutdown
//! ```

mod coordinator;
mod debouncer;
mod error;
mod event;

pub use coordinator::{WatchCoordinator, WatchSummary};
pub use debouncer::Debouncer;
pub use error::WatchError;
pub use event::{FsSubscription, PageEvent, PageEventFilter, PageEventKind};

/// Capacity of the channel between the notify thread and the coordinator.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
