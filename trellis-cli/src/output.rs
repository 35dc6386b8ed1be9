//! Listing output
//!
//! Renders a [`PipelineListing`] in the format requested with `--format`.

use anyhow::{Context, Result};
use colored::*;
use std::fmt::Write;
use std::path::Path;
use trellis_core::domain::pipeline::PipelineDescriptor;
use trellis_core::dto::pipeline::{ListFormat, PipelineListing};

const SCAN_RULE_WIDTH: usize = 50;
const NAMES_RULE_WIDTH: usize = 30;

/// Render `listing` as text, or `None` when the external tool already printed it
pub fn render_listing(
    listing: &PipelineListing,
    format: ListFormat,
    root: &Path,
) -> Result<Option<String>> {
    let text = match listing {
        PipelineListing::Delegated => return Ok(None),
        _ if format == ListFormat::Json => {
            serde_json::to_string_pretty(listing).context("Failed to encode listing as JSON")?
        }
        _ if format == ListFormat::Yaml => {
            serde_yaml::to_string(listing).context("Failed to encode listing as YAML")?
        }
        _ if format == ListFormat::Simple => simple(listing),
        PipelineListing::Names(names) => names_table(names),
        PipelineListing::Pipelines(pipelines) => scan_table(pipelines, root),
    };

    Ok(Some(text))
}

fn simple(listing: &PipelineListing) -> String {
    listing
        .names()
        .iter()
        .fold(String::new(), |mut out, name| {
            let _ = writeln!(out, "{}", name);
            out
        })
}

fn names_table(names: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Available pipelines:".bold());
    let _ = writeln!(out, "{}", "-".repeat(NAMES_RULE_WIDTH));
    for name in names {
        let _ = writeln!(out, "  {}", name);
    }
    let _ = writeln!(out, "\nTotal: {} pipeline(s)", names.len());
    out
}

fn scan_table(pipelines: &[PipelineDescriptor], root: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} {}:", "Pipelines in".bold(), root.display());
    let _ = writeln!(out, "{}", "-".repeat(SCAN_RULE_WIDTH));
    for pipeline in pipelines {
        let status = if pipeline.has_config {
            "[OK]".green()
        } else {
            "[MISSING CONFIG]".yellow()
        };
        let _ = writeln!(out, "  {:30} {}", pipeline.name, status);
    }
    let _ = writeln!(out, "\nTotal: {} pipeline(s)", pipelines.len());
    out
}
