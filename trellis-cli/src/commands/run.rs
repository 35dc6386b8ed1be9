//! Run command handler
//!
//! Decodes the structured run flags and hands the run to FlowerPower.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use trellis_client::DispatchError;
use trellis_core::domain::run::RunOptions;
use trellis_core::dto::pipeline::{RunOutcome, RunPipeline};

use super::{select_dispatcher, strategy_for};
use crate::args::{decode_final_vars, decode_inputs, normalize_pipeline_name};
use crate::config::Config;
use crate::types::{ExecutorArg, LogLevelArg};

/// Arguments of `trellis run`
#[derive(Args)]
pub struct RunArgs {
    /// Pipeline name (hyphens are replaced with underscores)
    pub name: String,

    /// Project root (defaults to the current directory)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Pipeline inputs as a JSON object, e.g. '{"key": "value"}'
    #[arg(short, long)]
    pub inputs: Option<String>,

    /// Outputs to compute as a JSON array, e.g. '["final_output"]'
    #[arg(short = 'o', long)]
    pub final_vars: Option<String>,

    /// Executor type
    #[arg(short, long, value_enum)]
    pub executor: Option<ExecutorArg>,

    /// Maximum number of executor workers
    #[arg(short = 'w', long)]
    pub max_workers: Option<u32>,

    /// Maximum number of retries on failure
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Delay between retries in seconds
    #[arg(long)]
    pub retry_delay: Option<f64>,

    /// FlowerPower log level
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Run configuration, a path or a JSON string passed through verbatim
    #[arg(long)]
    pub run_config: Option<String>,

    /// Use the FlowerPower library instead of the executable
    #[arg(long)]
    pub use_api: bool,
}

impl RunArgs {
    /// Decode the flags into a run request
    fn into_request(self) -> Result<RunPipeline> {
        let options = RunOptions {
            inputs: decode_inputs(self.inputs.as_deref())?,
            final_vars: decode_final_vars(self.final_vars.as_deref())?,
            executor: self.executor.map(Into::into),
            max_workers: self.max_workers,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay.map(finite_retry_delay).transpose()?,
            log_level: self.log_level.map(Into::into),
        };

        Ok(RunPipeline {
            name: normalize_pipeline_name(&self.name),
            base_dir: self.path,
            options,
            run_config: self.run_config,
        })
    }
}

/// JSON and Python's `float()` have no portable spelling for NaN or infinity
fn finite_retry_delay(delay: f64) -> Result<f64, DispatchError> {
    if delay.is_finite() {
        Ok(delay)
    } else {
        Err(DispatchError::malformed(
            "retry-delay",
            format!("{} is not a finite number of seconds", delay),
        ))
    }
}

/// Handle `trellis run`
pub fn handle_run_command(args: RunArgs, config: &Config) -> Result<()> {
    let strategy = strategy_for(args.use_api);
    let req = args.into_request()?;

    let dispatcher = select_dispatcher(strategy, config)?;
    let outcome = dispatcher
        .run(&req)
        .with_context(|| format!("Failed to run pipeline {}", req.name))?;

    if let RunOutcome::Completed(result) = outcome {
        println!("{}", "✓ Pipeline completed!".green().bold());
        println!(
            "Results: {}",
            serde_json::to_string_pretty(&result).context("Failed to encode run results")?
        );
    }

    Ok(())
}
