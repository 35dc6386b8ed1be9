//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A pipeline found in, or written to, a project
///
/// Identity is the `name`; a project holds at most one module and one
/// config per name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDescriptor {
    pub name: String,
    pub module_path: PathBuf,
    /// `None` when the pipeline has no configuration file
    pub config_path: Option<PathBuf>,
    pub has_config: bool,
}

/// Paths written when a pipeline is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldedPipeline {
    pub module_path: PathBuf,
    pub config_path: PathBuf,
}
