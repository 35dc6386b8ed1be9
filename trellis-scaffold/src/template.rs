//! Template store
//!
//! Two fixed templates: the Python module defining a pipeline's DAG and the
//! YAML file configuring it. Placeholders are written `{name}` and `{date}`
//! and substituted verbatim; every other brace in the templates is literal.

use chrono::NaiveDateTime;

/// Format of the creation timestamp stamped into module headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pipeline module skeleton
///
/// Four nodes chained load -> validate -> process -> final output. Hamilton
/// wires each function to the previous one through its parameter name.
/// `load_data` is parameterised from `params.input_config` in the pipeline
/// config, read when the module is imported.
pub const MODULE_TEMPLATE: &str = r#"# FlowerPower pipeline {name}
# Created on {date}

from pathlib import Path
from hamilton.function_modifiers import parameterize

from flowerpower.cfg import Config

# Load pipeline parameters from conf/pipelines/{name}.yml
PARAMS = Config.load(
    Path(__file__).parents[1], pipeline_name="{name}"
).pipeline.h_params


# Helper functions (prefix with underscore - not included in DAG)
def _validate_data(data: dict) -> bool:
    """Validate input data."""
    return data is not None and len(data) > 0


# Pipeline functions (each becomes a node in the DAG)

@parameterize(**PARAMS.get("input_config", {"source": "default"}))
def load_data(source: str) -> dict:
    """Load data from source.

    Args:
        source: Data source identifier

    Returns:
        Loaded data dictionary
    """
    # TODO: Implement data loading logic
    return {"source": source, "data": []}


def validate_data(load_data: dict) -> dict:
    """Validate loaded data.

    Args:
        load_data: Data from load_data node

    Returns:
        Validated data
    """
    if not _validate_data(load_data):
        raise ValueError("Invalid data")
    return load_data


def process_data(validate_data: dict) -> dict:
    """Process validated data.

    Args:
        validate_data: Data from validate_data node

    Returns:
        Processed data
    """
    # TODO: Implement processing logic
    return {"processed": True, **validate_data}


def final_output(process_data: dict) -> str:
    """Generate final output.

    Args:
        process_data: Data from process_data node

    Returns:
        Output summary string
    """
    return f"Processed {len(process_data)} items"
"#;

/// Pipeline configuration skeleton
pub const CONFIG_TEMPLATE: &str = r#"# Pipeline configuration for {name}
# See references/configuration.md for all options

params:
  input_config:
    source: "data/input.csv"

run:
  final_vars:
    - final_output

  # Executor configuration
  executor:
    type: synchronous
    # type: threadpool
    # max_workers: 4

  # Retry configuration
  # retry:
  #   max_retries: 3
  #   retry_delay: 1.0
  #   jitter_factor: 0.1

  # Logging level
  log_level: INFO
"#;

/// Render the module skeleton for `name`, stamped with `created`
pub fn render_module(name: &str, created: NaiveDateTime) -> String {
    let date = created.format(TIMESTAMP_FORMAT).to_string();
    fill(MODULE_TEMPLATE, &[("name", name), ("date", &date)])
}

/// Render the configuration skeleton for `name`
pub fn render_config(name: &str) -> String {
    fill(CONFIG_TEMPLATE, &[("name", name)])
}

/// Substitute `{key}` placeholders in a single left-to-right pass
///
/// Substituted values are never rescanned, so braces inside a value stay
/// literal. Braces that do not name a known key are copied unchanged.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let placeholder = values.iter().find_map(|(key, value)| {
            tail.strip_prefix(*key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });

        match placeholder {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_module_rendering_is_deterministic() {
        let first = render_module("etl_process", timestamp());
        let second = render_module("etl_process", timestamp());
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_header_and_config_lookup() {
        let module = render_module("etl_process", timestamp());

        assert!(module.starts_with("# FlowerPower pipeline etl_process\n"));
        assert!(module.contains("# Created on 2024-03-09 14:05:07\n"));
        assert!(module.contains(r#"pipeline_name="etl_process""#));
        assert!(module.contains("conf/pipelines/etl_process.yml"));
        assert!(!module.contains("{name}"));
        assert!(!module.contains("{date}"));
    }

    #[test]
    fn test_module_keeps_literal_braces() {
        let module = render_module("etl_process", timestamp());

        assert!(module.contains(r#"PARAMS.get("input_config", {"source": "default"})"#));
        assert!(module.contains(r#"f"Processed {len(process_data)} items""#));
    }

    #[test]
    fn test_placeholders_inside_name_stay_literal() {
        let module = render_module("x{date}", timestamp());

        assert!(module.starts_with("# FlowerPower pipeline x{date}\n"));
        assert!(module.contains(r#"pipeline_name="x{date}""#));
        assert!(module.contains("# Created on 2024-03-09 14:05:07\n"));

        let config = render_config("{name}");
        assert!(config.starts_with("# Pipeline configuration for {name}\n"));
    }

    #[test]
    fn test_fill_copies_unknown_braces() {
        assert_eq!(
            fill("{a} {b} {{a}} {", &[("a", "1")]),
            "1 {b} {1} {"
        );
    }

    #[test]
    fn test_module_stages_form_a_chain() {
        let module = render_module("chain", timestamp());

        let stages = [
            "def load_data(source: str) -> dict:",
            "def validate_data(load_data: dict) -> dict:",
            "def process_data(validate_data: dict) -> dict:",
            "def final_output(process_data: dict) -> str:",
        ];
        let positions: Vec<usize> = stages
            .iter()
            .map(|stage| module.find(stage).expect("stage missing from template"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_config_is_valid_yaml() {
        let config = render_config("etl_process");
        assert!(config.starts_with("# Pipeline configuration for etl_process\n"));
        assert_eq!(config, render_config("etl_process"));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&config).unwrap();
        assert_eq!(
            parsed["params"]["input_config"]["source"].as_str(),
            Some("data/input.csv")
        );
        assert_eq!(parsed["run"]["final_vars"][0].as_str(), Some("final_output"));
        assert_eq!(
            parsed["run"]["executor"]["type"].as_str(),
            Some("synchronous")
        );
        assert_eq!(parsed["run"]["log_level"].as_str(), Some("INFO"));
        // Retry is illustrative only
        assert!(parsed["run"].get("retry").is_none());
    }
}
