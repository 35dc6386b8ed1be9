//! Pipeline scaffolder
//!
//! Writes a rendered module and config into the conventional project layout.
//! The two writes are not transactional: if the config write fails after the
//! module was written, the module stays behind and a rerun with `overwrite`
//! is the way to recover.

use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use trellis_core::domain::pipeline::ScaffoldedPipeline;
use trellis_core::domain::project::ProjectLayout;

use crate::error::{Result, ScaffoldError};
use crate::template::{render_config, render_module};

/// Create the module and config files for pipeline `name` under `root`
///
/// # Arguments
/// * `name` - Pipeline name, already normalised
/// * `root` - Project root directory
/// * `overwrite` - Replace existing files instead of failing
/// * `created` - Timestamp stamped into the module header
///
/// # Errors
/// Returns [`ScaffoldError::Conflict`] when either file exists and
/// `overwrite` is false (the module is checked first), or
/// [`ScaffoldError::Io`] when a directory or file cannot be written.
pub fn scaffold_pipeline(
    name: &str,
    root: &Path,
    overwrite: bool,
    created: NaiveDateTime,
) -> Result<ScaffoldedPipeline> {
    let layout = ProjectLayout::new(root);
    let module_path = layout.module_path(name);
    let config_path = layout.config_path(name);

    if !overwrite {
        if module_path.exists() {
            return Err(ScaffoldError::Conflict {
                what: "pipeline module",
                path: module_path,
            });
        }
        if config_path.exists() {
            return Err(ScaffoldError::Conflict {
                what: "pipeline config",
                path: config_path,
            });
        }
    }

    for dir in [layout.pipelines_dir(), layout.config_dir()] {
        fs::create_dir_all(&dir).map_err(ScaffoldError::io(&dir))?;
    }

    debug!("Writing pipeline module {}", module_path.display());
    fs::write(&module_path, render_module(name, created))
        .map_err(ScaffoldError::io(&module_path))?;

    debug!("Writing pipeline config {}", config_path.display());
    fs::write(&config_path, render_config(name)).map_err(ScaffoldError::io(&config_path))?;

    info!("Scaffolded pipeline {} in {}", name, root.display());

    Ok(ScaffoldedPipeline {
        module_path,
        config_path,
    })
}
