//! Argument value types
//!
//! Command-line spellings of the core enums. Kept separate so the core
//! crate does not depend on clap.

use clap::ValueEnum;
use trellis_core::domain::run::{ExecutorKind, LogLevel};
use trellis_core::dto::pipeline::ListFormat;

/// Executor type accepted by `--executor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutorArg {
    Synchronous,
    Threadpool,
    Processpool,
    Ray,
    Dask,
}

impl From<ExecutorArg> for ExecutorKind {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Synchronous => ExecutorKind::Synchronous,
            ExecutorArg::Threadpool => ExecutorKind::Threadpool,
            ExecutorArg::Processpool => ExecutorKind::Processpool,
            ExecutorArg::Ray => ExecutorKind::Ray,
            ExecutorArg::Dask => ExecutorKind::Dask,
        }
    }
}

/// Logging level accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Warning => LogLevel::Warning,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Critical => LogLevel::Critical,
        }
    }
}

/// Listing format accepted by `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
    Yaml,
    Simple,
}

impl From<FormatArg> for ListFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => ListFormat::Table,
            FormatArg::Json => ListFormat::Json,
            FormatArg::Yaml => ListFormat::Yaml,
            FormatArg::Simple => ListFormat::Simple,
        }
    }
}
