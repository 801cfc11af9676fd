//! Route collection across all configured roots.
//!
//! One run walks every root, maps each page file to its route, reads the
//! page for a signature, applies include / exclude filtering and assigns
//! route ids. Records are rebuilt from scratch on every call.

use ignore::WalkBuilder;
use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::filter::{PatternError, RouteFilter};
use super::path_mapper::{MappedRoute, map_page_path};
use super::route_id::{derive_route_id, is_valid_identifier};
use super::RouteRecord;
use crate::config::RoutesConfig;
use crate::error::{RouteGenError, RouteGenResult};
use crate::signature::{PartialSignature, SignatureExtractor};

/// Problems that skip one input without failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectWarning {
    MissingRoot {
        root: PathBuf,
    },
    UnreadablePage {
        path: PathBuf,
        reason: String,
    },
    InvalidPattern(PatternError),
    DuplicatePath {
        route_path: String,
        kept: PathBuf,
        ignored: PathBuf,
    },
    OutsideRoot {
        path: PathBuf,
        root: PathBuf,
    },
    InvalidOverride {
        route_path: String,
        route_id: String,
    },
}

impl fmt::Display for CollectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectWarning::MissingRoot { root } => {
                write!(f, "Root {} does not exist, skipping", root.display())
            }
            CollectWarning::UnreadablePage { path, reason } => write!(
                f,
                "Cannot read {} ({reason}), using path-derived params",
                path.display()
            ),
            CollectWarning::InvalidPattern(e) => {
                write!(f, "Ignoring pattern '{}': {}", e.pattern, e.reason)
            }
            CollectWarning::DuplicatePath {
                route_path,
                kept,
                ignored,
            } => write!(
                f,
                "Route '{route_path}' is defined by both {} and {}, keeping the first",
                kept.display(),
                ignored.display()
            ),
            CollectWarning::OutsideRoot { path, root } => write!(
                f,
                "Page {} is not under root {}, skipping",
                path.display(),
                root.display()
            ),
            CollectWarning::InvalidOverride {
                route_path,
                route_id,
            } => write!(
                f,
                "Override '{route_id}' for '{route_path}' is not a valid identifier, using the derived id"
            ),
        }
    }
}

/// Output of one collection run.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    /// Records in collection order: roots as configured, files by name.
    pub routes: Vec<RouteRecord>,
    pub warnings: Vec<CollectWarning>,
}

impl RouteCollection {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collect every routable page under the configured roots.
///
/// Fails on a route id collision or when there is nothing to scan;
/// everything else degrades to a warning.
pub fn collect_routes(config: &RoutesConfig) -> RouteGenResult<RouteCollection> {
    if config.roots.is_empty() {
        return Err(RouteGenError::Config("no page roots configured".to_string()));
    }
    if config.page_file_names.is_empty() {
        return Err(RouteGenError::Config("no page file names configured".to_string()));
    }

    let mut warnings = Vec::new();

    let (filter, pattern_errors) = RouteFilter::compile(&config.include, &config.exclude);
    warnings.extend(pattern_errors.into_iter().map(CollectWarning::InvalidPattern));

    let extractor = SignatureExtractor::new(&config.factory_names);
    let options = config.mapping_options();

    let mut by_path: IndexMap<String, RouteRecord> = IndexMap::new();

    for root in &config.roots {
        if !root.is_dir() {
            warnings.push(CollectWarning::MissingRoot { root: root.clone() });
            continue;
        }

        for file in page_files(root, config) {
            let mapped = match map_page_path(&file, root, &options) {
                Ok(mapped) => mapped,
                Err(_) => {
                    warnings.push(CollectWarning::OutsideRoot {
                        path: file,
                        root: root.clone(),
                    });
                    continue;
                }
            };

            if !filter.allows(&mapped.route_path) {
                crate::debug_event!("collector", "filtered", "{}", mapped.route_path);
                continue;
            }

            if let Some(existing) = by_path.get(&mapped.route_path) {
                warnings.push(CollectWarning::DuplicatePath {
                    route_path: mapped.route_path,
                    kept: existing.source_file.clone(),
                    ignored: file,
                });
                continue;
            }

            let signature = match std::fs::read_to_string(&file) {
                Ok(text) => extractor.extract(&text),
                Err(e) => {
                    warnings.push(CollectWarning::UnreadablePage {
                        path: file.clone(),
                        reason: e.to_string(),
                    });
                    PartialSignature::default()
                }
            };

            let record = build_record(mapped, signature, file);
            by_path.insert(record.path.clone(), record);
        }
    }

    let mut routes: Vec<RouteRecord> = by_path.into_values().collect();
    assign_route_ids(&mut routes, &config.route_id_map, &mut warnings)?;

    for warning in &warnings {
        tracing::warn!("[collector] {warning}");
    }
    crate::debug_event!("collector", "collected", "{} routes", routes.len());

    Ok(RouteCollection { routes, warnings })
}

/// Page files under `root` in deterministic order.
///
/// Ignore files are not consulted; the watcher reacts to every page under a
/// root and both must agree on what exists.
fn page_files(root: &Path, config: &RoutesConfig) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .hidden(true)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("[collector] walk error under {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| config.is_page_file_name(name))
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn build_record(mapped: MappedRoute, signature: PartialSignature, file: PathBuf) -> RouteRecord {
    let params = mapped
        .param_names
        .iter()
        .map(|name| (name.clone(), signature.param_type(name)))
        .collect();

    RouteRecord {
        route_id: String::new(),
        path: mapped.route_path,
        params,
        search_params: signature.search_params.unwrap_or_default(),
        source_file: file,
    }
}

/// Fill in route ids, honoring overrides, and reject duplicates.
fn assign_route_ids(
    routes: &mut [RouteRecord],
    overrides: &IndexMap<String, String>,
    warnings: &mut Vec<CollectWarning>,
) -> RouteGenResult<()> {
    let mut owners: IndexMap<String, usize> = IndexMap::new();

    for index in 0..routes.len() {
        let route_id = match overrides.get(&routes[index].path) {
            Some(id) if is_valid_identifier(id) => id.clone(),
            Some(id) => {
                warnings.push(CollectWarning::InvalidOverride {
                    route_path: routes[index].path.clone(),
                    route_id: id.clone(),
                });
                derive_route_id(&routes[index].path)
            }
            None => derive_route_id(&routes[index].path),
        };

        if let Some(&first) = owners.get(&route_id) {
            return Err(RouteGenError::RouteIdCollision {
                route_id,
                first_path: routes[first].path.clone(),
                first_file: routes[first].source_file.clone(),
                second_path: routes[index].path.clone(),
                second_file: routes[index].source_file.clone(),
            });
        }

        owners.insert(route_id.clone(), index);
        routes[index].route_id = route_id;
    }

    Ok(())
}
