//! Local strategy
//!
//! Works without FlowerPower: pipelines are created from the built-in
//! templates and listed by scanning the project layout.

use chrono::Local;
use std::path::PathBuf;
use trellis_core::domain::pipeline::ScaffoldedPipeline;
use trellis_core::dto::pipeline::{
    CreatePipeline, ListPipelines, PipelineListing, RunOutcome, RunPipeline,
};
use trellis_core::dto::project::InitProject;
use trellis_scaffold::{scaffold_pipeline, scan_pipelines};

use crate::error::{DispatchError, Result};
use crate::{Dispatcher, Strategy, resolve_base_dir};

/// Dispatcher backed by templates and filesystem scans
#[derive(Debug, Clone, Default)]
pub struct LocalDispatcher;

impl LocalDispatcher {
    pub fn new() -> Self {
        Self
    }

    fn unsupported<T>(operation: &'static str) -> Result<T> {
        Err(DispatchError::Unsupported {
            operation,
            strategy: Strategy::Local,
        })
    }
}

impl Dispatcher for LocalDispatcher {
    fn init(&self, _req: &InitProject) -> Result<PathBuf> {
        Self::unsupported("init")
    }

    fn create(&self, req: &CreatePipeline) -> Result<ScaffoldedPipeline> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;
        let created = Local::now().naive_local();

        Ok(scaffold_pipeline(
            &req.name,
            &base_dir,
            req.overwrite,
            created,
        )?)
    }

    fn list(&self, req: &ListPipelines) -> Result<PipelineListing> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;
        Ok(PipelineListing::Pipelines(scan_pipelines(&base_dir)?))
    }

    fn run(&self, _req: &RunPipeline) -> Result<RunOutcome> {
        Self::unsupported("run")
    }

    fn strategy(&self) -> Strategy {
        Strategy::Local
    }
}
