//! Watch command - initial generation, then regenerate on page changes.

use console::style;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::generate::generate;
use crate::config::Settings;
use crate::regen::Regenerator;
use crate::watcher::{EVENT_CHANNEL_CAPACITY, FsSubscription, PageEventFilter, WatchCoordinator};

pub async fn run_watch(settings: &Settings, debounce_ms: Option<u64>) -> ExitCode {
    let routes = settings.resolved_routes();
    let debounce_ms = debounce_ms.unwrap_or(settings.watch.debounce_ms);
    let regenerator = Arc::new(Regenerator::new(routes.clone()));

    let initial = generate(&regenerator);
    if let Err(e) = &initial {
        eprintln!("{} {e:#}", style("Error:").red().bold());
    }

    if !settings.watch.enabled {
        crate::log_event!("watcher", "disabled", "watch.enabled = false");
        return if initial.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let filter = PageEventFilter::new(&routes);
    let (subscription, events) =
        match FsSubscription::subscribe(&routes.roots, filter, EVENT_CHANNEL_CAPACITY) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("{} {e}", style("Error:").red().bold());
                return ExitCode::FAILURE;
            }
        };

    let coordinator = WatchCoordinator::new(regenerator, debounce_ms);
    let ct = coordinator.cancellation_token();
    tokio::spawn(shutdown_on_ctrl_c(ct));

    eprintln!(
        "Watching {} root(s), debounce {debounce_ms}ms",
        subscription.watched_roots().len()
    );
    eprintln!("Press Ctrl+C to stop");

    let summary = coordinator.run(events).await;
    subscription.close();

    eprintln!(
        "Stopped after {} regeneration(s), {} failure(s), {} skipped",
        summary.regenerations, summary.failures, summary.skipped
    );
    ExitCode::SUCCESS
}

async fn shutdown_on_ctrl_c(ct: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            eprintln!("Received shutdown signal");
            ct.cancel();
        }
        Err(e) => tracing::error!("[watcher] cannot listen for Ctrl+C: {e}"),
    }
}
