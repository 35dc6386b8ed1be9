//! List command handler

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use trellis_client::{Strategy, resolve_base_dir};
use trellis_core::dto::pipeline::{ListFormat, ListPipelines};

use super::{select_dispatcher, strategy_for};
use crate::config::Config;
use crate::output::render_listing;
use crate::types::FormatArg;

/// Arguments of `trellis list`
#[derive(Args)]
pub struct ListArgs {
    /// Project root (defaults to the current directory)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
    pub format: FormatArg,

    /// Use the FlowerPower library instead of the executable
    #[arg(long, conflicts_with = "scan")]
    pub use_api: bool,

    /// Scan the project directory without FlowerPower
    #[arg(long)]
    pub scan: bool,
}

/// Handle `trellis list`
pub fn handle_list_command(args: ListArgs, config: &Config) -> Result<()> {
    let strategy = if args.scan {
        Strategy::Local
    } else {
        strategy_for(args.use_api)
    };
    let format = ListFormat::from(args.format);
    let root = resolve_base_dir(args.path.as_deref())?;

    let dispatcher = select_dispatcher(strategy, config)?;
    let listing = dispatcher
        .list(&ListPipelines {
            base_dir: args.path,
            format,
        })
        .with_context(|| format!("Failed to list pipelines in {}", root.display()))?;

    if let Some(text) = render_listing(&listing, format, &root)? {
        print!("{}", text);
    }

    Ok(())
}
