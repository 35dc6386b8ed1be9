//! Library strategy
//!
//! Calls FlowerPower's Python object model (`FlowerPowerProject`) through a
//! small bridge program run by the configured interpreter. The bridge reads
//! one request from stdin, performs exactly one library call and writes one
//! response envelope to stdout:
//!
//! ```text
//! {"ok": <result>}
//! {"error": {"kind": "<exception type>", "message": "<str(exception)>"}}
//! ```
//!
//! Anything the library prints while working is diverted to stderr, so it
//! reaches the user's terminal without corrupting the envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};
use trellis_core::domain::pipeline::ScaffoldedPipeline;
use trellis_core::domain::project::ProjectLayout;
use trellis_core::domain::run::ApiRunOptions;
use trellis_core::dto::pipeline::{
    CreatePipeline, ListPipelines, PipelineListing, RunOutcome, RunPipeline,
};
use trellis_core::dto::project::InitProject;

use crate::error::{DispatchError, Result};
use crate::{ClientConfig, Dispatcher, Strategy, resolve_base_dir};

/// Python program executed with `-c` for every library call
pub const BRIDGE_SCRIPT: &str = r#"import json
import sys


def main():
    request = json.load(sys.stdin)
    response = sys.stdout
    sys.stdout = sys.stderr
    try:
        from flowerpower import FlowerPowerProject

        op = request["op"]
        if op == "init":
            FlowerPowerProject.init(name=request["name"], base_dir=request.get("base_dir"))
            result = None
        else:
            project = FlowerPowerProject.load(request["base_dir"])
            if op == "new":
                project.pipeline_manager.new(name=request["name"], overwrite=request["overwrite"])
                result = None
            elif op == "list":
                result = list(project.pipeline_manager.list())
            elif op == "run":
                result = project.run(request["name"], **request["options"])
            else:
                raise ValueError("unknown operation: " + op)
        envelope = {"ok": result}
    except Exception as exc:
        envelope = {"error": {"kind": type(exc).__name__, "message": str(exc)}}
    response.write(json.dumps(envelope, default=repr))
    response.flush()


main()
"#;

/// A single library call, as sent to the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub(crate) enum BridgeCall {
    /// `FlowerPowerProject.init(name, base_dir)`
    Init {
        name: String,
        base_dir: Option<String>,
    },
    /// `project.pipeline_manager.new(name, overwrite)`
    New {
        base_dir: String,
        name: String,
        overwrite: bool,
    },
    /// `project.pipeline_manager.list()`
    List { base_dir: String },
    /// `project.run(name, **options)`
    Run {
        base_dir: String,
        name: String,
        options: ApiRunOptions,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BridgeResponse {
    Ok(JsonValue),
    Error { kind: String, message: String },
}

/// Dispatcher calling the FlowerPower library
#[derive(Debug, Clone)]
pub struct ApiDispatcher {
    config: ClientConfig,
}

impl ApiDispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn call(&self, call: &BridgeCall) -> Result<JsonValue> {
        let python = &self.config.python;
        let payload = serde_json::to_vec(call)
            .map_err(|e| DispatchError::Bridge(format!("failed to encode request: {}", e)))?;

        debug!("Calling FlowerPower library via {}: {:?}", python, call);

        let mut child = Command::new(python)
            .arg("-c")
            .arg(BRIDGE_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DispatchError::Spawn {
                program: python.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A bridge that died early closes the pipe; its exit status says why
            if let Err(e) = stdin.write_all(&payload) {
                warn!("Failed to send request to library bridge: {}", e);
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| DispatchError::Spawn {
                program: python.clone(),
                source,
            })?;

        if output.stdout.iter().all(u8::is_ascii_whitespace) && !output.status.success() {
            return Err(DispatchError::ExternalProcess {
                program: python.clone(),
                code: output.status.code().unwrap_or(-1),
            });
        }

        parse_response(&output.stdout)
    }

    fn project_dir(base_dir: Option<&std::path::Path>) -> Result<String> {
        Ok(resolve_base_dir(base_dir)?.display().to_string())
    }
}

/// Decode a bridge envelope into the library's result or its exception
pub(crate) fn parse_response(stdout: &[u8]) -> Result<JsonValue> {
    let response: BridgeResponse = serde_json::from_slice(stdout).map_err(|e| {
        DispatchError::Bridge(format!(
            "{} (output: {:?})",
            e,
            String::from_utf8_lossy(stdout).trim()
        ))
    })?;

    match response {
        BridgeResponse::Ok(value) => Ok(value),
        BridgeResponse::Error { kind, message } => Err(DispatchError::Library { kind, message }),
    }
}

impl Dispatcher for ApiDispatcher {
    fn init(&self, req: &InitProject) -> Result<PathBuf> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;

        self.call(&BridgeCall::Init {
            name: req.name.clone(),
            base_dir: req.base_dir.as_ref().map(|dir| dir.display().to_string()),
        })?;

        let project_dir = base_dir.join(&req.name);
        info!("Initialized project {}", project_dir.display());
        Ok(project_dir)
    }

    fn create(&self, req: &CreatePipeline) -> Result<ScaffoldedPipeline> {
        let base_dir = resolve_base_dir(req.base_dir.as_deref())?;

        self.call(&BridgeCall::New {
            base_dir: base_dir.display().to_string(),
            name: req.name.clone(),
            overwrite: req.overwrite,
        })?;

        let layout = ProjectLayout::new(base_dir);
        Ok(ScaffoldedPipeline {
            module_path: layout.module_path(&req.name),
            config_path: layout.config_path(&req.name),
        })
    }

    fn list(&self, req: &ListPipelines) -> Result<PipelineListing> {
        let value = self.call(&BridgeCall::List {
            base_dir: Self::project_dir(req.base_dir.as_deref())?,
        })?;

        let names: Vec<String> = serde_json::from_value(value).map_err(|e| {
            DispatchError::Bridge(format!("pipeline list is not a list of names: {}", e))
        })?;
        Ok(PipelineListing::Names(names))
    }

    fn run(&self, req: &RunPipeline) -> Result<RunOutcome> {
        if req.run_config.is_some() {
            warn!("--run-config is only understood by the flowerpower executable; ignoring it");
        }

        let result = self.call(&BridgeCall::Run {
            base_dir: Self::project_dir(req.base_dir.as_deref())?,
            name: req.name.clone(),
            options: ApiRunOptions::from(&req.options),
        })?;

        Ok(RunOutcome::Completed(result))
    }

    fn strategy(&self) -> Strategy {
        Strategy::Api
    }
}
