//! Watch mode over a real file system subscription.

use routegen::config::RoutesConfig;
use routegen::watcher::{
    EVENT_CHANNEL_CAPACITY, FsSubscription, PageEvent, PageEventFilter, PageEventKind,
    WatchCoordinator,
};
use routegen::{RegenOutcome, Regenerate, RouteGenResult, Regenerator};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

fn write_page(root: &Path, dir: &str, content: &str) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("page.tsx"), content).unwrap();
}

/// Poll until `check` holds or the timeout passes.
async fn wait_for(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    check()
}

struct Counting(AtomicUsize);

impl Regenerate for Counting {
    fn regenerate(&self) -> RouteGenResult<RegenOutcome> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(RegenOutcome::Unchanged {
            routes: 0,
            path: PathBuf::from("routes.ts"),
        })
    }
}

#[tokio::test]
async fn test_three_rapid_changes_one_regeneration() {
    let regen = Arc::new(Counting(AtomicUsize::new(0)));
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let task = tokio::spawn(WatchCoordinator::new(Arc::clone(&regen), 100).run(rx));

    for name in ["a", "b", "c"] {
        tx.send(PageEvent {
            kind: PageEventKind::Changed,
            path: PathBuf::from(format!("/app/{name}/page.tsx")),
        })
        .await
        .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    drop(tx);

    let summary = task.await.unwrap();
    assert_eq!(regen.0.load(Ordering::SeqCst), 1);
    assert_eq!(summary.events, 3);
    assert_eq!(summary.regenerations, 1);
}

#[tokio::test]
async fn test_page_edit_regenerates_artifact() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("apps/admin/src/app");
    write_page(&root, "brands", "export default createPage(Brands)");

    let config = RoutesConfig {
        roots: vec![root.clone()],
        output: temp.path().join("generated/routes.ts"),
        ..RoutesConfig::default()
    };
    let regenerator = Arc::new(Regenerator::new(config.clone()));
    regenerator.run().unwrap();
    let output = config.output.clone();

    let (subscription, events) = FsSubscription::subscribe(
        &config.roots,
        PageEventFilter::new(&config),
        EVENT_CHANNEL_CAPACITY,
    )
    .unwrap();
    assert_eq!(subscription.watched_roots(), &[root.clone()]);

    let coordinator = WatchCoordinator::new(Arc::clone(&regenerator), 50);
    let token = coordinator.cancellation_token();
    let task = tokio::spawn(coordinator.run(events));

    // Give the watcher a moment to register before touching files
    tokio::time::sleep(Duration::from_millis(100)).await;
    write_page(&root, "brands", "export default createPage<{}, { q: string }>(Brands)");

    let updated = wait_for(Duration::from_secs(5), || {
        fs::read_to_string(&output).is_ok_and(|c| c.contains("brands: { q?: string };"))
    })
    .await;
    assert!(updated, "artifact was not regenerated");

    token.cancel();
    let summary = task.await.unwrap();
    subscription.close();

    assert!(summary.events >= 1);
    assert!(summary.regenerations >= 1);
    assert_eq!(summary.failures, 0);
}

#[tokio::test]
async fn test_renaming_page_directory_regenerates_artifact() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("apps/admin/src/app");
    write_page(&root, "brands", "export default createPage(Brands)");
    write_page(&root, "settings", "export default createPage(Settings)");

    let config = RoutesConfig {
        roots: vec![root.clone()],
        output: temp.path().join("generated/routes.ts"),
        ..RoutesConfig::default()
    };
    let regenerator = Arc::new(Regenerator::new(config.clone()));
    regenerator.run().unwrap();
    let output = config.output.clone();
    assert!(fs::read_to_string(&output).unwrap().contains("/admin/brands"));

    let (subscription, events) = FsSubscription::subscribe(
        &config.roots,
        PageEventFilter::new(&config),
        EVENT_CHANNEL_CAPACITY,
    )
    .unwrap();

    let coordinator = WatchCoordinator::new(Arc::clone(&regenerator), 50);
    let token = coordinator.cancellation_token();
    let task = tokio::spawn(coordinator.run(events));

    tokio::time::sleep(Duration::from_millis(100)).await;
    fs::rename(root.join("brands"), root.join("products")).unwrap();

    let updated = wait_for(Duration::from_secs(5), || {
        fs::read_to_string(&output)
            .is_ok_and(|c| c.contains("/admin/products") && !c.contains("/admin/brands"))
    })
    .await;
    assert!(updated, "artifact still lists the moved route");

    token.cancel();
    let summary = task.await.unwrap();
    subscription.close();

    assert!(summary.events >= 1);
    assert_eq!(summary.failures, 0);
}
