//! Run options
//!
//! Every option a pipeline run accepts is optional on its own. An absent
//! field means "let FlowerPower apply its default"; it is never sent as a
//! null or empty value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Executor backends understood by FlowerPower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    Synchronous,
    Threadpool,
    Processpool,
    Ray,
    Dask,
}

impl ExecutorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorKind::Synchronous => "synchronous",
            ExecutorKind::Threadpool => "threadpool",
            ExecutorKind::Processpool => "processpool",
            ExecutorKind::Ray => "ray",
            ExecutorKind::Dask => "dask",
        }
    }
}

impl fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logging verbosity passed through to FlowerPower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat run options as the user supplies them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    pub inputs: Option<Map<String, JsonValue>>,
    pub final_vars: Option<Vec<String>>,
    pub executor: Option<ExecutorKind>,
    pub max_workers: Option<u32>,
    pub max_retries: Option<u32>,
    pub retry_delay: Option<f64>,
    pub log_level: Option<LogLevel>,
}

/// Nested options structure handed to `FlowerPowerProject.run`
///
/// Serialises with every absent field omitted, so it can be splatted as
/// keyword arguments on the library side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRunOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_vars: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<ExecutorOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorOptions {
    #[serde(rename = "type")]
    pub kind: ExecutorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay: Option<f64>,
}

impl From<&RunOptions> for ApiRunOptions {
    fn from(options: &RunOptions) -> Self {
        // max_workers only means something alongside an executor
        let executor = options.executor.map(|kind| ExecutorOptions {
            kind,
            max_workers: options.max_workers,
        });

        let retry = if options.max_retries.is_some() || options.retry_delay.is_some() {
            Some(RetryOptions {
                max_retries: options.max_retries,
                retry_delay: options.retry_delay,
            })
        } else {
            None
        };

        Self {
            inputs: options.inputs.clone(),
            final_vars: options.final_vars.clone(),
            executor,
            retry,
            log_level: options.log_level,
        }
    }
}
