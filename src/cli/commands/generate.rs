//! Generate command - one-shot regeneration or staleness check.

use anyhow::Context;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{RoutesConfig, Settings};
use crate::regen::{RegenOutcome, Regenerator};

/// Route settings with CLI overrides applied and all paths absolute.
///
/// CLI paths are relative to the current directory, configured ones to the
/// workspace root.
pub fn effective_routes(
    settings: &Settings,
    roots: Vec<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<RoutesConfig> {
    let mut routes = settings.resolved_routes();

    if !roots.is_empty() || output.is_some() {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        if !roots.is_empty() {
            routes.roots = roots.into_iter().map(|r| cwd.join(r)).collect();
        }
        if let Some(output) = output {
            routes.output = cwd.join(output);
        }
    }

    Ok(routes)
}

pub fn run_generate(
    settings: &Settings,
    roots: Vec<PathBuf>,
    output: Option<PathBuf>,
    check: bool,
) -> ExitCode {
    let result = effective_routes(settings, roots, output).and_then(|routes| {
        let regenerator = Regenerator::new(routes);
        if check {
            check_only(&regenerator)
        } else {
            generate(&regenerator).map(|_| true)
        }
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Regenerate and report. Shared with watch mode's initial run.
pub fn generate(regenerator: &Regenerator) -> anyhow::Result<RegenOutcome> {
    let outcome = regenerator
        .run()
        .context("route table generation failed")?;

    match &outcome {
        RegenOutcome::Written { routes, path } => println!(
            "{} {routes} routes to {}",
            style("Wrote").green().bold(),
            path.display()
        ),
        RegenOutcome::Unchanged { routes, path } => println!(
            "{} {} ({routes} routes)",
            style("Up to date").green(),
            path.display()
        ),
        RegenOutcome::Skipped => {
            println!("{}", style("Skipped: generation already running").yellow())
        }
    }

    Ok(outcome)
}

fn check_only(regenerator: &Regenerator) -> anyhow::Result<bool> {
    let up_to_date = regenerator
        .check()
        .context("route table check failed")?;
    let path = regenerator.output_path().display();

    if up_to_date {
        println!("{} {path}", style("Up to date").green());
    } else {
        eprintln!(
            "{} {path} is out of date, run `routegen generate`",
            style("Stale:").red().bold()
        );
    }
    Ok(up_to_date)
}
