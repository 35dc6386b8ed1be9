//! Core domain types
//!
//! This module contains the structures describing a FlowerPower project as
//! Trellis sees it: where pipelines live on disk, what a pipeline looks like
//! once scaffolded, and the options a run can carry.

pub mod pipeline;
pub mod project;
pub mod run;
