//! Error types for scaffolding and scanning

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for filesystem operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Target file exists and overwriting was not requested
    #[error("{what} already exists: {}", .path.display())]
    Conflict {
        /// Which file conflicted ("pipeline module" or "pipeline config")
        what: &'static str,
        path: PathBuf,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
