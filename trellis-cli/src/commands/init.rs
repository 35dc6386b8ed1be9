//! Init command handler
//!
//! Initializes a FlowerPower project, installing the package (with any
//! requested extras) first when needed.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use tracing::warn;
use trellis_client::probe;
use trellis_core::dto::project::{Extra, InitProject};

use super::{select_dispatcher, strategy_for};
use crate::config::Config;

/// Arguments of `trellis init`
#[derive(Args)]
pub struct InitArgs {
    /// Project name
    pub name: String,

    /// Directory the project is created in (defaults to the current directory)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Install the I/O extras
    #[arg(long)]
    pub with_io: bool,

    /// Install the UI extras
    #[arg(long)]
    pub with_ui: bool,

    /// Install every optional dependency
    #[arg(long)]
    pub with_all: bool,

    /// Use the FlowerPower library instead of the executable
    #[arg(long)]
    pub use_api: bool,

    /// Never install FlowerPower, even when it is missing
    #[arg(long)]
    pub no_install: bool,
}

impl InitArgs {
    /// Extras to install; `--with-all` supersedes the individual groups
    fn extras(&self) -> Vec<Extra> {
        if self.with_all {
            return vec![Extra::All];
        }

        let mut extras = Vec::new();
        if self.with_io {
            extras.push(Extra::Io);
        }
        if self.with_ui {
            extras.push(Extra::Ui);
        }
        extras
    }
}

/// Handle `trellis init`
pub fn handle_init_command(args: InitArgs, config: &Config) -> Result<()> {
    let extras = args.extras();
    ensure_installed(config, &extras, args.no_install)?;

    let dispatcher = select_dispatcher(strategy_for(args.use_api), config)?;
    let project_dir = dispatcher
        .init(&InitProject {
            name: args.name.clone(),
            base_dir: args.path,
        })
        .with_context(|| format!("Failed to initialize project {}", args.name))?;

    println!("{}", "✓ Project initialized!".green().bold());
    println!("  Location: {}", project_dir.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  1. cd {}", project_dir.display());
    println!(
        "  2. Create a pipeline: {}",
        "trellis create <pipeline-name>".cyan()
    );
    println!(
        "  3. Run it: {}",
        "trellis run <pipeline-name>".cyan()
    );

    Ok(())
}

/// Install FlowerPower when the library is missing or extras were requested
fn ensure_installed(config: &Config, extras: &[Extra], no_install: bool) -> Result<()> {
    let client = config.client()?;
    let missing = !probe::library_available(&client.python);

    if !missing && extras.is_empty() {
        return Ok(());
    }

    if no_install {
        if missing {
            warn!(
                "{} is not importable by {}; skipping installation",
                probe::PACKAGE,
                client.python
            );
        }
        return Ok(());
    }

    println!(
        "{} {}",
        "Installing".cyan(),
        probe::package_spec(extras)
    );
    probe::install_library(&client.python, extras).context("Failed to install FlowerPower")?;
    Ok(())
}
