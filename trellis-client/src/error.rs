//! Error types for the Trellis dispatchers

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use trellis_scaffold::ScaffoldError;

use crate::Strategy;

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors that can occur while dispatching an operation
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Target path already exists and overwriting was not requested
    #[error("{what} already exists: {}", .path.display())]
    Conflict { what: &'static str, path: PathBuf },

    /// A structured flag could not be decoded
    #[error("invalid value for --{flag}: {reason}")]
    MalformedArgument { flag: &'static str, reason: String },

    /// External executable exited with a non-zero status
    #[error("`{program}` exited with status {code}")]
    ExternalProcess {
        program: String,
        /// Exit code, -1 when the process was terminated by a signal
        code: i32,
    },

    /// The FlowerPower library raised an exception
    #[error("{kind}: {message}")]
    Library { kind: String, message: String },

    /// The selected strategy has no implementation of the operation
    #[error("{operation} is not supported by the {strategy} strategy")]
    Unsupported {
        operation: &'static str,
        strategy: Strategy,
    },

    /// External executable could not be started
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The library bridge answered with something other than a response envelope
    #[error("invalid library bridge response: {0}")]
    Bridge(String),
}

impl DispatchError {
    /// Create a malformed argument error for `flag`
    pub fn malformed(flag: &'static str, reason: impl ToString) -> Self {
        Self::MalformedArgument {
            flag,
            reason: reason.to_string(),
        }
    }

    /// Check if this error is a path conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<ScaffoldError> for DispatchError {
    fn from(err: ScaffoldError) -> Self {
        match err {
            ScaffoldError::Conflict { what, path } => Self::Conflict { what, path },
            ScaffoldError::Io { path, source } => Self::Io { path, source },
        }
    }
}
