//! Create command handler
//!
//! Creates a pipeline module and its configuration, either through
//! FlowerPower or from the built-in templates.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use trellis_client::Strategy;
use trellis_core::dto::pipeline::CreatePipeline;

use super::{select_dispatcher, strategy_for};
use crate::args::normalize_pipeline_name;
use crate::config::Config;

/// Arguments of `trellis create`
#[derive(Args)]
pub struct CreateArgs {
    /// Pipeline name (hyphens are replaced with underscores)
    pub name: String,

    /// Project root (defaults to the current directory)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Replace an existing pipeline
    #[arg(long)]
    pub overwrite: bool,

    /// Render the built-in templates without FlowerPower
    #[arg(long, conflicts_with = "use_api")]
    pub template_only: bool,

    /// Use the FlowerPower library instead of the executable
    #[arg(long)]
    pub use_api: bool,
}

/// Handle `trellis create`
pub fn handle_create_command(args: CreateArgs, config: &Config) -> Result<()> {
    let name = normalize_pipeline_name(&args.name);

    let strategy = if args.template_only {
        Strategy::Local
    } else {
        strategy_for(args.use_api)
    };

    let dispatcher = select_dispatcher(strategy, config)?;
    let created = dispatcher
        .create(&CreatePipeline {
            name: name.clone(),
            base_dir: args.path,
            overwrite: args.overwrite,
        })
        .with_context(|| format!("Failed to create pipeline {}", name))?;

    println!(
        "{} {}",
        "✓ Pipeline created:".green().bold(),
        name.bold()
    );
    println!("  Module: {}", created.module_path.display());
    println!("  Config: {}", created.config_path.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!(
        "  1. Edit {} to implement your pipeline logic",
        created.module_path.display()
    );
    println!(
        "  2. Adjust {} for parameters and execution settings",
        created.config_path.display()
    );
    println!(
        "  3. Run it: {}",
        format!("trellis run {}", name).cyan()
    );

    Ok(())
}
