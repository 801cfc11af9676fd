//! File system subscription and page event filtering.

use std::path::{Path, PathBuf};

use notify::event::{ModifyKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::error::WatchError;
use crate::config::RoutesConfig;

/// What happened to a page file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEventKind {
    Added,
    Changed,
    Removed,
}

/// A change to a page file under one of the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent {
    pub kind: PageEventKind,
    pub path: PathBuf,
}

/// Decides which raw file system events concern page files.
#[derive(Debug, Clone)]
pub struct PageEventFilter {
    roots: Vec<PathBuf>,
    page_file_names: Vec<String>,
    output: PathBuf,
}

impl PageEventFilter {
    /// Filter for resolved (absolute) route settings.
    pub fn new(config: &RoutesConfig) -> Self {
        Self {
            roots: config.roots.clone(),
            page_file_names: config.page_file_names.clone(),
            output: config.output.clone(),
        }
    }

    /// Whether `path` is a page file under a root and not the artifact.
    pub fn accepts(&self, path: &Path) -> bool {
        if path == self.output {
            return false;
        }

        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.page_file_names.iter().any(|p| p == name));

        is_page && self.is_under_root(path)
    }

    fn is_under_root(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| path.starts_with(root) && path != root)
    }

    /// Whether `kind` moved or removed a directory below a root.
    ///
    /// Moving a directory only reports the directory itself, never the
    /// pages inside it. A path that is gone is taken for a directory unless
    /// it ends in a file extension (`[...slug]` has none).
    fn is_directory_move(&self, kind: &EventKind, path: &Path) -> bool {
        let structural = match kind {
            EventKind::Modify(ModifyKind::Name(_)) => true,
            EventKind::Remove(RemoveKind::File) => false,
            EventKind::Remove(_) => true,
            _ => false,
        };
        if !structural || path == self.output || !self.is_under_root(path) {
            return false;
        }

        if matches!(kind, EventKind::Remove(RemoveKind::Folder)) {
            return true;
        }
        match std::fs::metadata(path) {
            Ok(meta) => meta.is_dir(),
            Err(_) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_none_or(|ext| !ext.chars().all(|c| c.is_ascii_alphanumeric())),
        }
    }

    /// Page events carried by one notify event.
    pub fn classify(&self, event: &Event) -> Vec<PageEvent> {
        event
            .paths
            .iter()
            .filter(|path| self.accepts(path) || self.is_directory_move(&event.kind, path))
            .filter_map(|path| {
                event_kind(&event.kind, path).map(|kind| PageEvent {
                    kind,
                    path: path.clone(),
                })
            })
            .collect()
    }
}

fn event_kind(kind: &EventKind, path: &Path) -> Option<PageEventKind> {
    match kind {
        EventKind::Create(_) => Some(PageEventKind::Added),
        // Renames report both ends; which end this path is shows on disk
        EventKind::Modify(ModifyKind::Name(_)) => Some(if path.exists() {
            PageEventKind::Added
        } else {
            PageEventKind::Removed
        }),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(PageEventKind::Changed),
        EventKind::Remove(_) => Some(PageEventKind::Removed),
        _ => None,
    }
}

/// Live notify subscription over the route roots.
///
/// Filtered events arrive on the receiver returned by [`subscribe`].
/// Dropping or closing the subscription closes that channel.
///
/// [`subscribe`]: FsSubscription::subscribe
pub struct FsSubscription {
    watcher: RecommendedWatcher,
    watched: Vec<PathBuf>,
}

impl FsSubscription {
    /// Watch every existing root recursively.
    ///
    /// Roots that cannot be watched are logged and skipped; at least one
    /// must succeed.
    pub fn subscribe(
        roots: &[PathBuf],
        filter: PageEventFilter,
        capacity: usize,
    ) -> Result<(Self, mpsc::Receiver<PageEvent>), WatchError> {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    for page_event in filter.classify(&event) {
                        // Receiver gone means the coordinator stopped
                        if tx.blocking_send(page_event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => tracing::error!("[watcher] file watch error: {e}"),
            }
        })?;

        let mut watched = Vec::new();
        for root in roots {
            if !root.is_dir() {
                tracing::warn!("[watcher] root {} does not exist, not watching", root.display());
                continue;
            }
            match watcher.watch(root, RecursiveMode::Recursive) {
                Ok(()) => {
                    crate::debug_event!("watcher", "watching", "{}", root.display());
                    watched.push(root.clone());
                }
                Err(e) => {
                    let err = WatchError::PathWatchFailed {
                        path: root.clone(),
                        reason: e.to_string(),
                    };
                    tracing::warn!("[watcher] {err}");
                }
            }
        }

        if watched.is_empty() {
            return Err(WatchError::NothingToWatch);
        }

        Ok((Self { watcher, watched }, rx))
    }

    pub fn watched_roots(&self) -> &[PathBuf] {
        &self.watched
    }

    /// Stop watching all roots and release the watcher.
    pub fn close(mut self) {
        for root in std::mem::take(&mut self.watched) {
            if let Err(e) = self.watcher.unwatch(&root) {
                crate::debug_event!("watcher", "unwatch failed", "{}: {e}", root.display());
            }
        }
        crate::log_event!("watcher", "stopped");
    }
}
