//! Subprocess strategy
//!
//! Builds `flowerpower` command lines and runs them with inherited stdio.

use std::path::PathBuf;
use tracing::info;
use trellis_core::domain::pipeline::ScaffoldedPipeline;
use trellis_core::domain::project::ProjectLayout;
use trellis_core::dto::pipeline::{
    CreatePipeline, ListPipelines, PipelineListing, RunOutcome, RunPipeline,
};
use trellis_core::dto::project::InitProject;

use crate::command::ExternalCommand;
use crate::error::{DispatchError, Result};
use crate::json::to_flag_json;
use crate::{ClientConfig, Dispatcher, Strategy, resolve_base_dir};

/// Dispatcher delegating to the FlowerPower executable
#[derive(Debug, Clone)]
pub struct CliDispatcher {
    config: ClientConfig,
}

impl CliDispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> ExternalCommand {
        ExternalCommand::new(&self.config.flowerpower_bin)
    }

    /// `flowerpower init --name <name> [--base-dir <dir>]`, run from the base directory
    pub fn init_command(&self, req: &InitProject) -> Result<ExternalCommand> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;

        let mut cmd = self.command();
        cmd.args(["init", "--name", req.name.as_str()])
            .flag("--base-dir", req.base_dir.as_ref().map(|dir| dir.display()))
            .current_dir(base_dir);
        Ok(cmd)
    }

    /// `flowerpower pipeline new <name> [--overwrite]`, run from the project root
    pub fn create_command(&self, req: &CreatePipeline) -> Result<ExternalCommand> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;

        let mut cmd = self.command();
        cmd.args(["pipeline", "new", req.name.as_str()]);
        if req.overwrite {
            cmd.arg("--overwrite");
        }
        cmd.current_dir(base_dir);
        Ok(cmd)
    }

    /// `flowerpower pipeline show-pipelines [--base-dir <dir>] --format <format>`
    pub fn list_command(&self, req: &ListPipelines) -> ExternalCommand {
        let mut cmd = self.command();
        cmd.args(["pipeline", "show-pipelines"])
            .flag("--base-dir", req.base_dir.as_ref().map(|dir| dir.display()))
            .args(["--format", req.format.as_str()]);
        cmd
    }

    /// `flowerpower pipeline run <name>` followed by one flag per present option
    ///
    /// Structured options (`inputs`, `final_vars`) are passed as JSON text.
    pub fn run_command(&self, req: &RunPipeline) -> Result<ExternalCommand> {
        let options = &req.options;

        let inputs = options
            .inputs
            .as_ref()
            .map(to_flag_json)
            .transpose()
            .map_err(|e| DispatchError::malformed("inputs", e))?;
        let final_vars = options
            .final_vars
            .as_ref()
            .map(to_flag_json)
            .transpose()
            .map_err(|e| DispatchError::malformed("final-vars", e))?;

        let mut cmd = self.command();
        cmd.args(["pipeline", "run", req.name.as_str()])
            .flag("--base-dir", req.base_dir.as_ref().map(|dir| dir.display()))
            .flag("--inputs", inputs)
            .flag("--final-vars", final_vars)
            .flag("--executor", options.executor)
            .flag("--executor-max-workers", options.max_workers)
            .flag("--max-retries", options.max_retries)
            // Debug keeps the decimal point: 1.0 stays "1.0"
            .flag("--retry-delay", options.retry_delay.map(|d| format!("{:?}", d)))
            .flag("--log-level", options.log_level)
            .flag("--run-config", req.run_config.as_deref());
        Ok(cmd)
    }
}

impl Dispatcher for CliDispatcher {
    fn init(&self, req: &InitProject) -> Result<PathBuf> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;
        self.init_command(req)?.run()?;

        let project_dir = base_dir.join(&req.name);
        info!("Initialized project {}", project_dir.display());
        Ok(project_dir)
    }

    fn create(&self, req: &CreatePipeline) -> Result<ScaffoldedPipeline> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;
        self.create_command(req)?.run()?;

        let layout = ProjectLayout::new(base_dir);
        Ok(ScaffoldedPipeline {
            module_path: layout.module_path(&req.name),
            config_path: layout.config_path(&req.name),
        })
    }

    fn list(&self, req: &ListPipelines) -> Result<PipelineListing> {
        self.list_command(req).run()?;
        Ok(PipelineListing::Delegated)
    }

    fn run(&self, req: &RunPipeline) -> Result<RunOutcome> {
        self.run_command(req)?.run()?;
        Ok(RunOutcome::Delegated)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Cli
    }
}
