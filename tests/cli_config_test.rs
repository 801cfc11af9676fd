use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn routegen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_routegen"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run routegen")
}

fn write_page(root: &Path, dir: &str, content: &str) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("page.tsx"), content).unwrap();
}

fn write_settings(dir: &Path, content: &str) {
    let config_dir = dir.join(".routegen");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("settings.toml"), content).unwrap();
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();

    let output = routegen(temp_dir.path(), &["init"]);
    assert!(output.status.success());

    let config_path = temp_dir.path().join(".routegen/settings.toml");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("version = 1"));
    assert!(content.contains("[routes]"));
    assert!(content.contains("[watch]"));

    // Second init refuses without --force
    let output = routegen(temp_dir.path(), &["init"]);
    assert!(!output.status.success());
    let output = routegen(temp_dir.path(), &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        r#"
version = 2
[watch]
debounce_ms = 99
"#,
    );

    let output = routegen(temp_dir.path(), &["config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("version = 2"));
    assert!(stdout.contains("debounce_ms = 99"));
}

#[test]
fn test_config_found_from_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(temp_dir.path(), "[watch]\ndebounce_ms = 77\n");
    let nested = temp_dir.path().join("apps/admin");
    fs::create_dir_all(&nested).unwrap();

    let output = routegen(&nested, &["config"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("debounce_ms = 77"));
}

#[test]
fn test_generate_and_check() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        r#"
[routes]
roots = ["apps/admin/src/app"]
output = "generated/routes.ts"
"#,
    );
    let root = temp_dir.path().join("apps/admin/src/app");
    write_page(&root, "brands/[id]", "export default createPage<{ id: number }>(Page)");

    let output = routegen(temp_dir.path(), &["generate", "--check"]);
    assert_eq!(output.status.code(), Some(1), "missing artifact is stale");

    let output = routegen(temp_dir.path(), &["generate"]);
    assert!(output.status.success());
    let artifact = temp_dir.path().join("generated/routes.ts");
    let content = fs::read_to_string(&artifact).unwrap();
    assert!(content.contains("brandsIdDetail: { id: number };"));

    let output = routegen(temp_dir.path(), &["generate", "--check"]);
    assert!(output.status.success());

    write_page(&root, "settings", "");
    let output = routegen(temp_dir.path(), &["generate", "--check"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_generate_cli_overrides() {
    let temp_dir = TempDir::new().unwrap();
    write_page(&temp_dir.path().join("web/app"), "about", "");

    let output = routegen(
        temp_dir.path(),
        &["generate", "--root", "web/app", "--output", "out/routes.ts"],
    );
    assert!(output.status.success());

    let content = fs::read_to_string(temp_dir.path().join("out/routes.ts")).unwrap();
    assert!(content.contains("'/about': 'about'"));
}

#[test]
fn test_collision_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        r#"
[routes]
roots = ["apps/admin/src/app", "apps/shop/src/app"]
output = "routes.ts"
"#,
    );
    write_page(&temp_dir.path().join("apps/admin/src/app"), "brands", "");
    write_page(&temp_dir.path().join("apps/shop/src/app"), "brands", "");

    let output = routegen(temp_dir.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("brands"));
    assert!(stderr.contains("/admin/brands"));
    assert!(stderr.contains("/shop/brands"));
    assert!(!temp_dir.path().join("routes.ts").exists());
}

#[test]
fn test_routes_json() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(temp_dir.path(), "[routes]\nroots = [\"app\"]\n");
    write_page(
        &temp_dir.path().join("app"),
        "search",
        "createPage<{}, { q: string }>(Page)",
    );

    let output = routegen(temp_dir.path(), &["routes", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["routes"][0]["routeId"], "search");
    assert_eq!(value["routes"][0]["path"], "/search");
    assert_eq!(value["routes"][0]["searchParams"]["q"], "string");
}

#[test]
fn test_watch_disabled_generates_once() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(
        temp_dir.path(),
        r#"
[routes]
roots = ["app"]
output = "routes.ts"

[watch]
enabled = false
"#,
    );
    write_page(&temp_dir.path().join("app"), "", "");

    let output = routegen(temp_dir.path(), &["watch"]);
    assert!(output.status.success());

    let content = fs::read_to_string(temp_dir.path().join("routes.ts")).unwrap();
    assert!(content.contains("home: Record<string, never>;"));
}
