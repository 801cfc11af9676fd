//! JSON manifest of the route table, used by `routegen routes --json`.

use serde::Serialize;

use crate::routes::RouteRecord;

#[derive(Serialize)]
struct Manifest<'a> {
    version: u32,
    routes: &'a [RouteRecord],
}

/// Renders records as a pretty-printed JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, routes: &[RouteRecord]) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(&Manifest { version: 1, routes })?;
        out.push('\n');
        Ok(out)
    }
}
