//! Routes command - print the collected route table.

use console::style;
use std::process::ExitCode;

use crate::config::Settings;
use crate::emit::JsonEmitter;
use crate::routes::{RouteRecord, collect_routes};

pub fn run_routes(settings: &Settings, json: bool) -> ExitCode {
    let collection = match collect_routes(&settings.resolved_routes()) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            return ExitCode::FAILURE;
        }
    };

    if json {
        return match JsonEmitter::new().render(&collection.routes) {
            Ok(out) => {
                print!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error rendering JSON: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if collection.is_empty() {
        println!("No routes found.");
        return ExitCode::SUCCESS;
    }

    let id_width = collection
        .routes
        .iter()
        .map(|r| r.route_id.len())
        .max()
        .unwrap_or(0);

    for route in &collection.routes {
        println!(
            "{}  {}{}",
            style(format!("{:<id_width$}", route.route_id)).cyan(),
            route.path,
            style(describe_params(route)).dim()
        );
    }
    println!("\n{} routes", collection.len());

    ExitCode::SUCCESS
}

fn describe_params(route: &RouteRecord) -> String {
    let mut parts = Vec::new();
    if !route.params.is_empty() {
        let params: Vec<String> = route
            .params
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        parts.push(format!("params {{ {} }}", params.join(", ")));
    }
    if !route.search_params.is_empty() {
        let search: Vec<String> = route
            .search_params
            .iter()
            .map(|(k, v)| format!("{k}?: {v}"))
            .collect();
        parts.push(format!("search {{ {} }}", search.join(", ")));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("  {}", parts.join("  "))
    }
}
