//! Trellis Scaffold
//!
//! Filesystem side of Trellis. Everything here works without FlowerPower
//! being installed:
//! - Template store for pipeline modules and pipeline configs
//! - Scaffolder writing a new pipeline into the conventional layout
//! - Scanner listing the pipelines of a project from disk

pub mod error;
pub mod scaffold;
pub mod scan;
pub mod template;

pub use error::{Result, ScaffoldError};
pub use scaffold::scaffold_pipeline;
pub use scan::scan_pipelines;
pub use template::{render_config, render_module};

pub use trellis_core::domain::pipeline::{PipelineDescriptor, ScaffoldedPipeline};
