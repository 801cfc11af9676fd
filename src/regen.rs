//! Regeneration: collect, render, write.
//!
//! A `Regenerator` owns the resolved route settings and the one artifact it
//! produces. Runs never overlap: a call made while another is in progress
//! returns [`RegenOutcome::Skipped`] instead of queueing.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;

use crate::config::RoutesConfig;
use crate::emit::TypeScriptEmitter;
use crate::error::{RouteGenError, RouteGenResult};
use crate::routes::{RouteCollection, collect_routes};

/// Result of a single regeneration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenOutcome {
    /// The artifact was (re)written.
    Written { routes: usize, path: PathBuf },
    /// The artifact already had the rendered content and was left alone.
    Unchanged { routes: usize, path: PathBuf },
    /// Another run was in progress.
    Skipped,
}

/// Anything the watch coordinator can trigger.
pub trait Regenerate: Send + Sync + 'static {
    fn regenerate(&self) -> RouteGenResult<RegenOutcome>;
}

pub struct Regenerator {
    config: RoutesConfig,
    emitter: TypeScriptEmitter,
    running: AtomicBool,
}

/// Clears the running flag when dropped, including on early return.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Regenerator {
    /// `config` paths are used as given; resolve them first.
    pub fn new(config: RoutesConfig) -> Self {
        Self {
            config,
            emitter: TypeScriptEmitter::new(),
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &RoutesConfig {
        &self.config
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Collect and render without touching the file system output.
    pub fn render(&self) -> RouteGenResult<(RouteCollection, String)> {
        let collection = collect_routes(&self.config)?;
        let content = self.emitter.render(&collection.routes);
        Ok((collection, content))
    }

    /// Collect, render and write the artifact if its content changed.
    pub fn run(&self) -> RouteGenResult<RegenOutcome> {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            crate::log_event!("regen", "skipped", "a run is already in progress");
            return Ok(RegenOutcome::Skipped);
        };

        let (collection, content) = self.render()?;
        let path = self.config.output.clone();
        let routes = collection.len();

        if self.is_current(&content) {
            crate::debug_event!("regen", "unchanged", "{}", path.display());
            return Ok(RegenOutcome::Unchanged { routes, path });
        }

        write_atomic(&path, &content)?;
        crate::log_event!("regen", "written", "{} routes to {}", routes, path.display());

        Ok(RegenOutcome::Written { routes, path })
    }

    /// Whether the artifact on disk matches what a run would write.
    pub fn check(&self) -> RouteGenResult<bool> {
        let (_, content) = self.render()?;
        Ok(self.is_current(&content))
    }

    fn is_current(&self, content: &str) -> bool {
        std::fs::read_to_string(&self.config.output).is_ok_and(|existing| existing == content)
    }
}

impl Regenerate for Regenerator {
    fn regenerate(&self) -> RouteGenResult<RegenOutcome> {
        self.run()
    }
}

/// Replace `path` with `content` in one rename; parents are created.
fn write_atomic(path: &Path, content: &str) -> RouteGenResult<()> {
    let write_err = |source| RouteGenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    // Temp files are created owner-only; keep the mode the artifact had
    let permissions = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}
