//! Trellis Core
//!
//! Core types shared by the Trellis crates.
//!
//! This crate contains:
//! - Domain types: pipeline descriptors, project layout, run options
//! - DTOs: requests and results passed between the front end and dispatchers

pub mod domain;
pub mod dto;
