//! Trellis CLI
//!
//! Command-line interface for scaffolding, listing and running FlowerPower
//! pipelines.

mod args;
mod commands;
mod config;
mod output;
mod types;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis_client::{DEFAULT_FLOWERPOWER_BIN, DEFAULT_PYTHON, DispatchError};

#[derive(Parser)]
#[command(name = "trellis", version)]
#[command(about = "Scaffold, list and run FlowerPower pipelines", long_about = None)]
struct Cli {
    /// FlowerPower executable
    #[arg(
        long,
        global = true,
        env = "TRELLIS_FLOWERPOWER_BIN",
        default_value = DEFAULT_FLOWERPOWER_BIN
    )]
    flowerpower_bin: String,

    /// Python interpreter with the FlowerPower library installed
    #[arg(long, global = true, env = "TRELLIS_PYTHON", default_value = DEFAULT_PYTHON)]
    python: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config {
        flowerpower_bin: cli.flowerpower_bin,
        python: cli.python,
    };

    match handle_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output from the Trellis crates with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,trellis_cli=debug,trellis_client=debug,trellis_scaffold=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Print a one-line diagnostic for a failed command
fn report(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(dispatch) = err.downcast_ref::<DispatchError>() {
        if dispatch.is_conflict() {
            eprintln!("Use --overwrite to replace existing pipeline");
        }
    }
}
