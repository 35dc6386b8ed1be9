//! Pipeline DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::PathBuf;

use crate::domain::pipeline::PipelineDescriptor;
use crate::domain::run::RunOptions;

/// Request to create a new pipeline in a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
    pub base_dir: Option<PathBuf>,
    pub overwrite: bool,
}

/// Output format for pipeline listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Simple,
}

impl ListFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListFormat::Table => "table",
            ListFormat::Json => "json",
            ListFormat::Yaml => "yaml",
            ListFormat::Simple => "simple",
        }
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to list the pipelines of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPipelines {
    pub base_dir: Option<PathBuf>,
    /// Only consulted when listing is delegated to the FlowerPower executable
    pub format: ListFormat,
}

/// Request to run a pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunPipeline {
    pub name: String,
    pub base_dir: Option<PathBuf>,
    pub options: RunOptions,
    /// Path to a RunConfig YAML file or an inline JSON string, passed verbatim
    pub run_config: Option<String>,
}

/// Pipelines found by a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineListing {
    /// The external tool printed the listing itself
    Delegated,
    /// Names reported by the pipeline manager
    Names(Vec<String>),
    /// Descriptors found on disk
    Pipelines(Vec<PipelineDescriptor>),
}

impl PipelineListing {
    /// Names in listing order, empty for delegated listings
    pub fn names(&self) -> Vec<&str> {
        match self {
            PipelineListing::Delegated => Vec::new(),
            PipelineListing::Names(names) => names.iter().map(String::as_str).collect(),
            PipelineListing::Pipelines(pipelines) => {
                pipelines.iter().map(|p| p.name.as_str()).collect()
            }
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The external tool ran the pipeline and exited successfully
    Delegated,
    /// Result mapping returned by `FlowerPowerProject.run`
    Completed(JsonValue),
}
