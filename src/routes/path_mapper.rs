//! Mapping from page file locations to route templates.
//!
//! All functions use `Path` APIs instead of string manipulation so that
//! separators are handled the same way on every platform. Nothing here
//! touches the file system.

use std::path::{Component, Path, PathBuf};

use crate::error::{RouteGenError, RouteGenResult};

/// Settings that shape how a root directory turns into a route prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOptions {
    /// Directory name that groups applications, e.g. `apps` in `apps/admin/src/app`.
    pub apps_marker: String,
    /// Prefix used when the root is not inside an apps group.
    pub default_prefix: String,
    /// Route for a page file placed directly in the root.
    pub home_route: String,
    /// Workspace directory; only the part of a root below it is searched
    /// for the apps marker.
    pub base_dir: Option<PathBuf>,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            apps_marker: "apps".to_string(),
            default_prefix: String::new(),
            home_route: "/".to_string(),
            base_dir: None,
        }
    }
}

/// Route template and dynamic parameter names derived from a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRoute {
    pub route_path: String,
    /// Parameter names in the order their segments appear.
    pub param_names: Vec<String>,
}

/// Map a page file found under `root` to its route.
///
/// The directories between `root` and the file become route segments;
/// `[name]`, `[...name]` and `[[...name]]` segments are parameters and keep
/// their bracket notation, `(group)` segments are dropped.
pub fn map_page_path(
    file: &Path,
    root: &Path,
    options: &MappingOptions,
) -> RouteGenResult<MappedRoute> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| RouteGenError::OutsideRoot {
            path: file.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let dir = relative.parent().unwrap_or_else(|| Path::new(""));

    let mut segments = Vec::new();
    let mut param_names = Vec::new();

    for component in dir.components() {
        let segment = match component {
            Component::Normal(os) => os.to_string_lossy(),
            Component::CurDir => continue,
            _ => {
                return Err(RouteGenError::OutsideRoot {
                    path: file.to_path_buf(),
                    root: root.to_path_buf(),
                });
            }
        };

        if is_route_group(&segment) {
            continue;
        }
        if let Some(name) = param_name(&segment) {
            param_names.push(name.to_string());
        }
        segments.push(segment.into_owned());
    }

    let prefix = app_prefix(root, options);
    let route_path = if segments.is_empty() {
        join_route(&prefix, &options.home_route)
    } else {
        format!("{prefix}/{}", segments.join("/"))
    };

    Ok(MappedRoute {
        route_path,
        param_names,
    })
}

/// Route prefix for everything found under `root`.
///
/// `/repo/apps/admin/src/app` gives `/admin`; roots outside an apps group
/// get the normalized default prefix (possibly empty). Directories above
/// `base_dir` never count, and the marker closest to the pages wins.
pub fn app_prefix(root: &Path, options: &MappingOptions) -> String {
    let scoped = options
        .base_dir
        .as_deref()
        .and_then(|base| root.strip_prefix(base).ok())
        .unwrap_or(root);

    let names: Vec<String> = scoped
        .components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let app = names
        .iter()
        .rposition(|name| name == &options.apps_marker)
        .and_then(|i| names.get(i + 1));

    match app {
        Some(name) => format!("/{name}"),
        None => normalize_prefix(&options.default_prefix),
    }
}

/// Parameter name of a dynamic segment, `None` for literal segments.
pub fn param_name(segment: &str) -> Option<&str> {
    let inner = segment
        .strip_prefix("[[...")
        .and_then(|s| s.strip_suffix("]]"))
        .or_else(|| segment.strip_prefix("[...").and_then(|s| s.strip_suffix(']')))
        .or_else(|| segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')))?;

    (!inner.is_empty()).then_some(inner)
}

/// Whether a segment is a `(group)` folder that does not affect the URL.
pub fn is_route_group(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('(') && segment.ends_with(')')
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn join_route(prefix: &str, home_route: &str) -> String {
    let home = home_route.trim_matches('/');
    match (prefix.is_empty(), home.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{home}"),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{home}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn admin_root() -> PathBuf {
        PathBuf::from("/repo/apps/admin/src/app")
    }

    #[test]
    fn test_maps_parameterized_page_under_app_root() {
        let root = admin_root();
        let file = root.join("brands/[id]/page.tsx");

        let mapped = map_page_path(&file, &root, &MappingOptions::default()).unwrap();

        assert_eq!(mapped.route_path, "/admin/brands/[id]");
        assert_eq!(mapped.param_names, vec!["id"]);
    }

    #[test]
    fn test_params_keep_path_order() {
        let root = admin_root();
        let file = root.join("brands/[id]/[idd]/page.tsx");

        let mapped = map_page_path(&file, &root, &MappingOptions::default()).unwrap();

        assert_eq!(mapped.route_path, "/admin/brands/[id]/[idd]");
        assert_eq!(mapped.param_names, vec!["id", "idd"]);
    }

    #[test]
    fn test_root_without_apps_marker_uses_default_prefix() {
        let root = PathBuf::from("/repo/src/app");
        let file = root.join("settings/page.tsx");

        let mapped = map_page_path(&file, &root, &MappingOptions::default()).unwrap();
        assert_eq!(mapped.route_path, "/settings");

        let options = MappingOptions {
            default_prefix: "web/".to_string(),
            ..MappingOptions::default()
        };
        let mapped = map_page_path(&file, &root, &options).unwrap();
        assert_eq!(mapped.route_path, "/web/settings");
    }

    #[test]
    fn test_page_in_root_maps_to_home() {
        let options = MappingOptions::default();

        let root = PathBuf::from("/repo/src/app");
        let mapped = map_page_path(&root.join("page.tsx"), &root, &options).unwrap();
        assert_eq!(mapped.route_path, "/");
        assert!(mapped.param_names.is_empty());

        let root = admin_root();
        let mapped = map_page_path(&root.join("page.tsx"), &root, &options).unwrap();
        assert_eq!(mapped.route_path, "/admin");

        let options = MappingOptions {
            home_route: "/home".to_string(),
            ..MappingOptions::default()
        };
        let mapped = map_page_path(&root.join("page.tsx"), &root, &options).unwrap();
        assert_eq!(mapped.route_path, "/admin/home");
    }

    #[test]
    fn test_route_groups_are_dropped() {
        let root = PathBuf::from("/repo/src/app");
        let file = root.join("(marketing)/pricing/page.tsx");

        let mapped = map_page_path(&file, &root, &MappingOptions::default()).unwrap();

        assert_eq!(mapped.route_path, "/pricing");
    }

    #[test]
    fn test_catch_all_segments() {
        let root = PathBuf::from("/repo/src/app");
        let file = root.join("docs/[...slug]/page.tsx");
        let mapped = map_page_path(&file, &root, &MappingOptions::default()).unwrap();
        assert_eq!(mapped.route_path, "/docs/[...slug]");
        assert_eq!(mapped.param_names, vec!["slug"]);

        assert_eq!(param_name("[[...rest]]"), Some("rest"));
        assert_eq!(param_name("[]"), None);
        assert_eq!(param_name("brands"), None);
    }

    #[test]
    fn test_apps_marker_above_workspace_is_ignored() {
        let options = MappingOptions {
            base_dir: Some(PathBuf::from("/home/dev/apps/mysite")),
            ..MappingOptions::default()
        };
        let root = PathBuf::from("/home/dev/apps/mysite/src/app");

        let mapped = map_page_path(&root.join("brands/page.tsx"), &root, &options).unwrap();

        assert_eq!(mapped.route_path, "/brands");
    }

    #[test]
    fn test_nearest_apps_marker_wins() {
        let root = PathBuf::from("/srv/apps/monorepo/apps/admin/src/app");
        assert_eq!(app_prefix(&root, &MappingOptions::default()), "/admin");

        let options = MappingOptions {
            base_dir: Some(PathBuf::from("/srv/apps/monorepo")),
            ..MappingOptions::default()
        };
        assert_eq!(app_prefix(&root, &options), "/admin");
    }

    #[test]
    fn test_file_outside_root_is_rejected() {
        let root = admin_root();
        let file = PathBuf::from("/elsewhere/brands/page.tsx");

        let err = map_page_path(&file, &root, &MappingOptions::default()).unwrap_err();

        assert!(matches!(err, RouteGenError::OutsideRoot { .. }));
    }
}
