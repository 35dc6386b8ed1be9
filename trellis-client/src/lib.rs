//! Trellis Dispatchers
//!
//! Every user-facing operation (init, create, list, run) can be carried out
//! by interchangeable strategies behind the [`Dispatcher`] trait:
//! - [`CliDispatcher`]: shells out to the `flowerpower` executable
//! - [`ApiDispatcher`]: calls the FlowerPower Python library's object model
//! - [`LocalDispatcher`]: renders templates and scans the filesystem, with no
//!   FlowerPower installation required (create and list only)
//!
//! The strategy is always chosen explicitly by the caller.
//!
//! # Example
//!
//! ```no_run
//! use trellis_client::{ClientConfig, Strategy, dispatcher};
//! use trellis_core::dto::pipeline::{ListFormat, ListPipelines};
//!
//! let local = dispatcher(Strategy::Local, ClientConfig::default());
//! let listing = local.list(&ListPipelines {
//!     base_dir: Some("/projects/analytics".into()),
//!     format: ListFormat::Table,
//! })?;
//!
//! for name in listing.names() {
//!     println!("{}", name);
//! }
//! # Ok::<(), trellis_client::DispatchError>(())
//! ```

mod api;
mod cli;
mod command;
pub mod error;
mod json;
mod local;
pub mod probe;

pub use api::{ApiDispatcher, BRIDGE_SCRIPT};
pub use cli::CliDispatcher;
pub use command::ExternalCommand;
pub use error::{DispatchError, Result};
pub use json::to_flag_json;
pub use local::LocalDispatcher;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use trellis_core::domain::pipeline::ScaffoldedPipeline;
use trellis_core::dto::pipeline::{
    CreatePipeline, ListPipelines, PipelineListing, RunOutcome, RunPipeline,
};
use trellis_core::dto::project::InitProject;

/// Default name of the FlowerPower executable
pub const DEFAULT_FLOWERPOWER_BIN: &str = "flowerpower";

/// Default Python interpreter used for the library bridge
pub const DEFAULT_PYTHON: &str = "python3";

/// The four operations, each implemented once per strategy
pub trait Dispatcher {
    /// Initialize a project, returning its directory
    fn init(&self, req: &InitProject) -> Result<PathBuf>;

    /// Create a pipeline, returning the module and config paths
    fn create(&self, req: &CreatePipeline) -> Result<ScaffoldedPipeline>;

    /// List the pipelines of a project
    fn list(&self, req: &ListPipelines) -> Result<PipelineListing>;

    /// Run a pipeline to completion
    fn run(&self, req: &RunPipeline) -> Result<RunOutcome>;

    /// Strategy implemented by this dispatcher
    fn strategy(&self) -> Strategy;
}

/// How an operation is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Subprocess invocation of the FlowerPower executable
    Cli,
    /// In-process call into the FlowerPower library
    Api,
    /// Template rendering and filesystem scanning
    Local,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Cli => "cli",
            Strategy::Api => "api",
            Strategy::Local => "local",
        };
        f.write_str(name)
    }
}

/// Settings shared by all dispatchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// FlowerPower executable, a bare name looked up on PATH or a path
    pub flowerpower_bin: String,
    /// Python interpreter with the FlowerPower library installed
    pub python: String,
}

impl ClientConfig {
    pub fn new(flowerpower_bin: impl Into<String>, python: impl Into<String>) -> Self {
        Self {
            flowerpower_bin: flowerpower_bin.into(),
            python: python.into(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.flowerpower_bin.trim().is_empty() {
            return Err("flowerpower executable cannot be empty".to_string());
        }
        if self.python.trim().is_empty() {
            return Err("python interpreter cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FLOWERPOWER_BIN, DEFAULT_PYTHON)
    }
}

/// Build the dispatcher for `strategy`
pub fn dispatcher(strategy: Strategy, config: ClientConfig) -> Box<dyn Dispatcher> {
    match strategy {
        Strategy::Cli => Box::new(CliDispatcher::new(config)),
        Strategy::Api => Box::new(ApiDispatcher::new(config)),
        Strategy::Local => Box::new(LocalDispatcher::new()),
    }
}

/// Directory an operation works in: `base_dir` or the current directory
pub fn resolve_base_dir(base_dir: Option<&Path>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(|source| DispatchError::Io {
            path: PathBuf::from("."),
            source,
        }),
    }
}
