//! Route records and the pipeline that builds them from page files.
//!
//! ```text
//! roots ──walk──> page files ──path_mapper──> route path + param names
//!                     │
//!                     └──signature──> param / search-param types
//!                                   │
//!                     filter + route_id ──> RouteCollection
//! ```

pub mod collector;
pub mod filter;
pub mod path_mapper;
pub mod route_id;

pub use collector::{CollectWarning, RouteCollection, collect_routes};
pub use filter::RouteFilter;
pub use path_mapper::{MappedRoute, MappingOptions, map_page_path};
pub use route_id::{derive_route_id, is_valid_identifier};

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Type of a route parameter or search parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteParamType {
    #[default]
    String,
    Number,
    /// A type expression kept as written, e.g. `'details' | 'settings'`.
    Literal(String),
}

impl RouteParamType {
    /// Classify a type expression taken from page source.
    pub fn from_type_text(text: &str) -> Self {
        match text.trim() {
            "" | "string" => RouteParamType::String,
            "number" => RouteParamType::Number,
            other => RouteParamType::Literal(other.to_string()),
        }
    }

    /// TypeScript spelling of this type.
    pub fn as_type_text(&self) -> &str {
        match self {
            RouteParamType::String => "string",
            RouteParamType::Number => "number",
            RouteParamType::Literal(text) => text,
        }
    }
}

impl fmt::Display for RouteParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_type_text())
    }
}

impl Serialize for RouteParamType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_type_text())
    }
}

/// One routable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub route_id: String,
    /// Route template, e.g. `/admin/brands/[id]`.
    pub path: String,
    /// Dynamic parameters in path order.
    pub params: IndexMap<String, RouteParamType>,
    /// Query parameters in the order the page declares them.
    pub search_params: IndexMap<String, RouteParamType>,
    #[serde(skip)]
    pub source_file: PathBuf,
}
