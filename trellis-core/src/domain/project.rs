//! Project layout

use std::path::PathBuf;

/// Directory holding pipeline modules, relative to the project root
pub const PIPELINES_DIR: &str = "pipelines";

/// Directory holding project configuration, relative to the project root
pub const CONF_DIR: &str = "conf";

/// Extension of pipeline module files
pub const MODULE_EXTENSION: &str = "py";

/// Extension of pipeline configuration files
pub const CONFIG_EXTENSION: &str = "yml";

/// Modules whose file name starts with this prefix are helpers, not pipelines
pub const PRIVATE_PREFIX: char = '_';

/// Conventional directory layout of a FlowerPower project
///
/// ```text
/// <root>/pipelines/<name>.py
/// <root>/conf/pipelines/<name>.yml
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory containing pipeline modules
    pub fn pipelines_dir(&self) -> PathBuf {
        self.root.join(PIPELINES_DIR)
    }

    /// Directory containing per-pipeline configuration files
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONF_DIR).join(PIPELINES_DIR)
    }

    pub fn module_path(&self, name: &str) -> PathBuf {
        self.pipelines_dir()
            .join(format!("{}.{}", name, MODULE_EXTENSION))
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir()
            .join(format!("{}.{}", name, CONFIG_EXTENSION))
    }

    /// A pipeline is complete when both its module and its config exist
    pub fn is_complete(&self, name: &str) -> bool {
        self.module_path(name).is_file() && self.config_path(name).is_file()
    }
}
