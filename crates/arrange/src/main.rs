//! arrange CLI - navigation arrangement for documentation sites.
//!
//! Provides commands for:
//! - `build`: Arrange the navigation and print it as JSON or an outline
//! - `check`: Arrange the navigation and report problems only

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs};
use output::Output;

/// arrange - per-directory navigation for documentation sites.
#[derive(Parser)]
#[command(name = "arrange", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arrange the navigation and output it.
    Build(BuildArgs),
    /// Arrange the navigation and report warnings and errors.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Build(args) => args.nav.verbose,
        Commands::Check(args) => args.nav.verbose,
    };

    // --verbose enables INFO level, otherwise defer to RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
