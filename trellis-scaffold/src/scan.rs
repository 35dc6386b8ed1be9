//! Filesystem pipeline scanner
//!
//! Lists pipelines by looking at the project layout directly, without
//! FlowerPower installed.

use std::fs;
use std::path::Path;
use tracing::debug;
use trellis_core::domain::pipeline::PipelineDescriptor;
use trellis_core::domain::project::{MODULE_EXTENSION, PRIVATE_PREFIX, ProjectLayout};

use crate::error::{Result, ScaffoldError};

/// Scan `root` for pipeline modules
///
/// Every `pipelines/*.py` file is a pipeline unless its name starts with an
/// underscore. Results are sorted by name. A project without a `pipelines`
/// directory has no pipelines.
pub fn scan_pipelines(root: &Path) -> Result<Vec<PipelineDescriptor>> {
    let layout = ProjectLayout::new(root);
    let pipelines_dir = layout.pipelines_dir();

    if !pipelines_dir.is_dir() {
        debug!("No pipelines directory in {}", root.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&pipelines_dir).map_err(ScaffoldError::io(&pipelines_dir))?;

    let mut pipelines = Vec::new();
    for entry in entries {
        let module_path = entry.map_err(ScaffoldError::io(&pipelines_dir))?.path();

        if !module_path.is_file()
            || module_path.extension().and_then(|ext| ext.to_str()) != Some(MODULE_EXTENSION)
        {
            continue;
        }

        let Some(name) = module_path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if name.starts_with(PRIVATE_PREFIX) {
            continue;
        }

        let has_config = layout.is_complete(name);
        let config_path = layout.config_path(name);

        pipelines.push(PipelineDescriptor {
            name: name.to_string(),
            module_path: module_path.clone(),
            config_path: has_config.then_some(config_path),
            has_config,
        });
    }

    pipelines.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} pipeline(s) in {}", pipelines.len(), root.display());

    Ok(pipelines)
}
