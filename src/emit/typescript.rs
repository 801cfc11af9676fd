//! TypeScript route table.
//!
//! Layout of the generated file:
//!
//! ```ts
//! export interface RouteParamsById { brandsIdDetail: { id: number }; }
//! export interface RouteSearchParamsById { brandsIdDetail: { tab?: 'a' | 'b' }; }
//! export const routes = { brandsIdDetail: { path, params, searchParams } } as const;
//! export const routeIdByPath = { '/admin/brands/[id]': 'brandsIdDetail' } as const;
//! export type RouteId = keyof typeof routes;
//! export type RoutePath = | '/admin/brands/[id]';
//! ```

use indexmap::IndexMap;

use super::{quote, render_key};
use crate::routes::{RouteParamType, RouteRecord};

const HEADER: &str = "\
// This file is generated by routegen. Do not edit it by hand.
// Run `routegen generate` to refresh it.
/* eslint-disable */
";

const EMPTY_SHAPE: &str = "Record<string, never>";

/// Renders the route table as a TypeScript module.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Full file contents. The same records always give the same bytes.
    pub fn render(&self, routes: &[RouteRecord]) -> String {
        let mut out = String::with_capacity(256 + routes.len() * 256);
        out.push_str(HEADER);

        out.push_str("\nexport interface RouteParamsById {\n");
        for route in routes {
            out.push_str(&format!(
                "  {}: {};\n",
                route.route_id,
                shape(&route.params, false)
            ));
        }
        out.push_str("}\n");

        out.push_str("\nexport interface RouteSearchParamsById {\n");
        for route in routes {
            out.push_str(&format!(
                "  {}: {};\n",
                route.route_id,
                shape(&route.search_params, true)
            ));
        }
        out.push_str("}\n");

        out.push_str("\nexport const routes = {\n");
        for route in routes {
            let id = &route.route_id;
            out.push_str(&format!("  {id}: {{\n"));
            out.push_str(&format!("    path: {},\n", quote(&route.path)));
            out.push_str(&format!("    params: {{}} as RouteParamsById['{id}'],\n"));
            out.push_str(&format!(
                "    searchParams: {{}} as RouteSearchParamsById['{id}'],\n"
            ));
            out.push_str("  },\n");
        }
        out.push_str("} as const;\n");

        out.push_str("\nexport const routeIdByPath = {\n");
        for route in routes {
            out.push_str(&format!(
                "  {}: {},\n",
                quote(&route.path),
                quote(&route.route_id)
            ));
        }
        out.push_str("} as const;\n");

        out.push_str("\nexport type RouteId = keyof typeof routes;\n");

        if routes.is_empty() {
            out.push_str("\nexport type RoutePath = never;\n");
        } else {
            out.push_str("\nexport type RoutePath =\n");
            for (i, route) in routes.iter().enumerate() {
                let end = if i + 1 == routes.len() { ";" } else { "" };
                out.push_str(&format!("  | {}{end}\n", quote(&route.path)));
            }
        }

        out.push_str("\nexport type RouteParams<Id extends RouteId> = RouteParamsById[Id];\n");
        out.push_str(
            "export type RouteSearchParams<Id extends RouteId> = RouteSearchParamsById[Id];\n",
        );

        out
    }
}

/// Inline object type; optional members get `?`.
fn shape(members: &IndexMap<String, RouteParamType>, optional: bool) -> String {
    if members.is_empty() {
        return EMPTY_SHAPE.to_string();
    }

    let marker = if optional { "?" } else { "" };
    let body: Vec<String> = members
        .iter()
        .map(|(key, ty)| format!("{}{marker}: {ty}", render_key(key)))
        .collect();

    format!("{{ {} }}", body.join("; "))
}
