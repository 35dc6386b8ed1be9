//! Capability probes
//!
//! Answer "is FlowerPower usable this way?" with a plain boolean before a
//! strategy is chosen, and install the package when it is not.

use std::process::{Command, Stdio};
use tracing::{debug, info};
use trellis_core::dto::project::Extra;

use crate::command::ExternalCommand;
use crate::error::Result;

/// Python package providing both the executable and the library
pub const PACKAGE: &str = "flowerpower";

/// Checks whether `program` can be started and answers `--help`
pub fn executable_available(program: &str) -> bool {
    let available = Command::new(program)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    debug!("Executable {} available: {}", program, available);
    available
}

/// Checks whether `python` can import the FlowerPower library
pub fn library_available(python: &str) -> bool {
    let import = format!("import {}", PACKAGE);
    let available = Command::new(python)
        .args(["-c", import.as_str()])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);

    debug!("Library {} importable by {}: {}", PACKAGE, python, available);
    available
}

/// pip requirement for the package with `extras`, e.g. `flowerpower[io,ui]`
pub fn package_spec(extras: &[Extra]) -> String {
    if extras.is_empty() {
        return PACKAGE.to_string();
    }

    let extras: Vec<&str> = extras.iter().map(Extra::as_str).collect();
    format!("{}[{}]", PACKAGE, extras.join(","))
}

/// `<python> -m pip install <package spec>`
pub fn install_command(python: &str, extras: &[Extra]) -> ExternalCommand {
    let mut cmd = ExternalCommand::new(python);
    cmd.args(["-m", "pip", "install"]).arg(package_spec(extras));
    cmd
}

/// Install FlowerPower with `extras` into `python`'s environment
pub fn install_library(python: &str, extras: &[Extra]) -> Result<()> {
    info!("Installing {}", package_spec(extras));
    install_command(python, extras).run()
}
