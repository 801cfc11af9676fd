//! Error types for route collection, emission and regeneration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run or reject a single input.
#[derive(Error, Debug)]
pub enum RouteGenError {
    #[error("Page file {path} is not under root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error(
        "Route id '{route_id}' is derived from both '{first_path}' ({first_file}) and '{second_path}' ({second_file})\nSuggestion: add an entry for one of them to [routes.route_id_map]"
    )]
    RouteIdCollision {
        route_id: String,
        first_path: String,
        first_file: PathBuf,
        second_path: String,
        second_file: PathBuf,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RouteGenResult<T> = Result<T, RouteGenError>;
