use clap::Parser;
use std::process::ExitCode;

use routegen::Settings;
use routegen::cli::commands::{generate, init, routes, watch};
use routegen::cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Init must work before any configuration exists
    if let Commands::Init { force } = cli.command {
        routegen::logging::init();
        return init::run_init(force);
    }

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    routegen::logging::init_with_config(&settings.logging);
    if settings.debug {
        tracing::debug!("[cli] settings: {settings:?}");
    }

    match cli.command {
        Commands::Init { .. } => ExitCode::SUCCESS,
        Commands::Config => init::run_config(&settings),
        Commands::Generate {
            roots,
            output,
            check,
        } => generate::run_generate(&settings, roots, output, check),
        Commands::Watch { debounce_ms } => watch::run_watch(&settings, debounce_ms).await,
        Commands::Routes { json } => routes::run_routes(&settings, json),
    }
}
