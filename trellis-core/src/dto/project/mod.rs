//! Project DTOs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Optional dependency group of the FlowerPower package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extra {
    /// I/O plugins (pandas, polars, duckdb, ...)
    Io,
    /// Hamilton UI support
    Ui,
    /// Every optional dependency
    All,
}

impl Extra {
    pub fn as_str(&self) -> &'static str {
        match self {
            Extra::Io => "io",
            Extra::Ui => "ui",
            Extra::All => "all",
        }
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to initialize a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitProject {
    pub name: String,
    /// Directory the project is created in; the current directory when absent
    pub base_dir: Option<PathBuf>,
}
