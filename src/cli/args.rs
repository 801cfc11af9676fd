//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Typed route table generator
#[derive(Parser, Debug)]
#[command(
    name = "routegen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a typed route table from page files",
    long_about = "Scan page directories, infer routes and their parameters, and emit a TypeScript route table.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Quick Start:\n  $ routegen init                 # Create .routegen/settings.toml\n  $ routegen generate             # Write the route table once\n  $ routegen watch                # Keep it in sync while editing\n  $ routegen routes --json        # Inspect collected routes"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .routegen directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .routegen/settings.toml")]
    Config,

    /// Generate the route table once
    #[command(
        about = "Scan page roots and write the route table",
        after_help = "Examples:\n  routegen generate\n  routegen generate --root apps/admin/src/app --output src/routes.ts\n  routegen generate --check"
    )]
    Generate {
        /// Page root to scan (repeatable, replaces configured roots)
        #[arg(long = "root", value_name = "DIR")]
        roots: Vec<PathBuf>,

        /// Output file (overrides config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail instead of writing when the route table is out of date
        #[arg(long)]
        check: bool,
    },

    /// Regenerate whenever page files change
    #[command(about = "Generate, then watch page roots and regenerate on change")]
    Watch {
        /// Quiet period in milliseconds before regenerating (overrides config)
        #[arg(long, value_name = "MS")]
        debounce_ms: Option<u64>,
    },

    /// Print the collected route table
    #[command(about = "List routes, ids and parameters without writing anything")]
    Routes {
        /// Output the table as JSON
        #[arg(long)]
        json: bool,
    },
}
