//! Tactile CLI - drive touch controls and a character from scripted scenarios
//!
//! # Commands
//!
//! - `tactile run <scenario>` - Simulate a scenario and report every event
//! - `tactile check <scenario>` - Validate a scenario and describe its setup
//! - `tactile defaults` - Print a controls layout with all defaults
//!
//! Logging follows `RUST_LOG` (default `info`); `RUST_LOG=debug` also shows
//! pointer ownership and state-machine hand-offs.

mod check;
mod defaults;
mod run;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Tactile CLI - touch control and character movement scenarios
#[derive(Parser)]
#[command(name = "tactile")]
#[command(about = "Replay touch input and character movement scenarios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a scenario tick by tick
    Run(run::RunArgs),

    /// Validate a scenario without simulating it
    Check(check::CheckArgs),

    /// Print the default controls layout
    Defaults(defaults::DefaultsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Check(args) => check::execute(args),
        Commands::Defaults(args) => defaults::execute(args),
    }
}
