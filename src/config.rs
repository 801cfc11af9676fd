//! Configuration for route generation.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.routegen/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the command layer)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `RG_` and use double underscores
//! to separate nested levels:
//! - `RG_WATCH__DEBOUNCE_MS=100` sets `watch.debounce_ms`
//! - `RG_ROUTES__OUTPUT=src/routes.ts` sets `routes.output`
//! - `RG_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::routes::MappingOptions;

/// Directory holding the settings file; also marks the workspace root.
pub const CONFIG_DIR: &str = ".routegen";
const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .routegen is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default)]
    pub debug: bool,

    /// Route discovery and output
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Watch mode
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RoutesConfig {
    /// Directories scanned for page files, in order
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    /// Generated definitions file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File names that mark a page
    #[serde(default = "default_page_file_names")]
    pub page_file_names: Vec<String>,

    /// Generic factory calls the signature extractor recognizes
    #[serde(default = "default_factory_names")]
    pub factory_names: Vec<String>,

    /// Only routes matching one of these survive (when non-empty)
    #[serde(default)]
    pub include: Vec<String>,

    /// Routes matching any of these are dropped
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory name grouping applications (`apps/<name>/...`)
    #[serde(default = "default_apps_marker")]
    pub apps_marker: String,

    /// Route prefix for roots outside an apps group
    #[serde(default)]
    pub default_prefix: String,

    /// Route of a page placed directly in a root
    #[serde(default = "default_home_route")]
    pub home_route: String,

    /// Directory the roots were resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,

    /// Explicit route ids keyed by route path
    #[serde(default)]
    pub route_id_map: IndexMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    /// Whether `routegen watch` keeps watching after the first generation
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Quiet period before a burst of changes triggers regeneration
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `routegen::watcher = "debug"`
    #[serde(default)]
    pub modules: IndexMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("src/app")]
}
fn default_output() -> PathBuf {
    PathBuf::from("src/generated/routes.ts")
}
fn default_page_file_names() -> Vec<String> {
    ["page.tsx", "page.ts", "page.jsx", "page.js"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_factory_names() -> Vec<String> {
    vec![crate::signature::DEFAULT_FACTORY.to_string()]
}
fn default_apps_marker() -> String {
    "apps".to_string()
}
fn default_home_route() -> String {
    "/".to_string()
}
fn default_debounce_ms() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            routes: RoutesConfig::default(),
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            output: default_output(),
            page_file_names: default_page_file_names(),
            factory_names: default_factory_names(),
            include: Vec::new(),
            exclude: Vec::new(),
            apps_marker: default_apps_marker(),
            default_prefix: String::new(),
            home_route: default_home_route(),
            base_dir: None,
            route_id_map: IndexMap::new(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: IndexMap::new(),
        }
    }
}

impl RoutesConfig {
    /// Path mapping knobs for the path mapper.
    pub fn mapping_options(&self) -> MappingOptions {
        MappingOptions {
            apps_marker: self.apps_marker.clone(),
            default_prefix: self.default_prefix.clone(),
            home_route: self.home_route.clone(),
            base_dir: self.base_dir.clone(),
        }
    }

    /// Copy with roots and output made absolute against `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        let absolute = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        };

        Self {
            roots: self.roots.iter().map(absolute).collect(),
            output: absolute(&self.output),
            base_dir: Some(base.to_path_buf()),
            ..self.clone()
        }
    }

    /// Whether `name` is a page file name.
    pub fn is_page_file_name(&self, name: &str) -> bool {
        self.page_file_names.iter().any(|n| n == name)
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    ///
    /// The workspace root defaults to the directory containing `.routegen`
    /// (or the file's own directory for files kept elsewhere).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        let path = path.as_ref();
        Self::figment(path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::root_for_config_file(path);
                }
                settings
            })
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscore stays
            .merge(Env::prefixed("RG_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    fn root_for_config_file(path: &Path) -> Option<PathBuf> {
        let dir = path.parent()?;
        let dir = if dir.as_os_str().is_empty() {
            std::env::current_dir().ok()?
        } else {
            dir.to_path_buf()
        };
        if dir.file_name().is_some_and(|n| n == CONFIG_DIR) {
            dir.parent().map(Path::to_path_buf)
        } else {
            Some(dir)
        }
    }

    /// Find the settings file by looking for `.routegen` from the current
    /// directory up to the file system root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get the workspace root directory (where .routegen is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Directory that relative paths in the configuration resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Route settings with absolute roots and output.
    pub fn resolved_routes(&self) -> RoutesConfig {
        self.routes.resolved_against(&self.base_dir())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `dir`
    pub fn init_config_file(
        dir: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
