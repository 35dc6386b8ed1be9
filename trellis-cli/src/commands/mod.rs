//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod create;
mod init;
mod list;
mod run;

pub use create::CreateArgs;
pub use init::InitArgs;
pub use list::ListArgs;
pub use run::RunArgs;

use anyhow::{Result, bail};
use clap::Subcommand;
use tracing::debug;
use trellis_client::{Dispatcher, Strategy, dispatcher, probe};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new FlowerPower project
    Init(InitArgs),
    /// Create a new pipeline in a project
    Create(CreateArgs),
    /// List the pipelines of a project
    List(ListArgs),
    /// Run a pipeline
    Run(RunArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Init(args) => init::handle_init_command(args, config),
        Commands::Create(args) => create::handle_create_command(args, config),
        Commands::List(args) => list::handle_list_command(args, config),
        Commands::Run(args) => run::handle_run_command(args, config),
    }
}

/// Strategy selected by a command's `--use-api` flag
fn strategy_for(use_api: bool) -> Strategy {
    if use_api { Strategy::Api } else { Strategy::Cli }
}

/// Build the dispatcher for `strategy`, checking the executable first when
/// the operation is delegated to it
fn select_dispatcher(strategy: Strategy, config: &Config) -> Result<Box<dyn Dispatcher>> {
    let client = config.client()?;

    if strategy == Strategy::Cli && !probe::executable_available(&client.flowerpower_bin) {
        bail!(
            "`{}` is not available; install FlowerPower with `pip install {}` or pass --use-api",
            client.flowerpower_bin,
            probe::PACKAGE
        );
    }

    debug!("Using {} strategy", strategy);
    Ok(dispatcher(strategy, client))
}
