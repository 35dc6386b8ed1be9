//! Argument decoding
//!
//! Turns raw flag text into the structured values the dispatchers expect.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use tracing::warn;
use trellis_client::DispatchError;

/// Replace hyphens with underscores, warning when anything changed
///
/// Pipeline names become Python module names, which cannot contain hyphens.
pub fn normalize_pipeline_name(name: &str) -> String {
    if !name.contains('-') {
        return name.to_string();
    }

    let normalized = name.replace('-', "_");
    warn!(
        "Pipeline names should use underscores, not hyphens. Using: {}",
        normalized
    );
    normalized
}

/// Decode `--inputs` as a JSON object
pub fn decode_inputs(raw: Option<&str>) -> Result<Option<Map<String, JsonValue>>, DispatchError> {
    raw.map(|text| decode_json("inputs", text)).transpose()
}

/// Decode `--final-vars` as a JSON array of strings
pub fn decode_final_vars(raw: Option<&str>) -> Result<Option<Vec<String>>, DispatchError> {
    raw.map(|text| decode_json("final-vars", text)).transpose()
}

fn decode_json<T: DeserializeOwned>(flag: &'static str, text: &str) -> Result<T, DispatchError> {
    serde_json::from_str(text).map_err(|e| DispatchError::malformed(flag, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hyphens_become_underscores() {
        assert_eq!(normalize_pipeline_name("my-pipe"), "my_pipe");
        assert_eq!(normalize_pipeline_name("a-b-c"), "a_b_c");
        assert_eq!(normalize_pipeline_name("already_fine"), "already_fine");
    }

    #[test]
    fn test_decode_inputs() {
        let inputs = decode_inputs(Some(r#"{"key": "value", "n": 3}"#))
            .unwrap()
            .unwrap();
        assert_eq!(inputs.get("key"), Some(&json!("value")));
        assert_eq!(inputs.get("n"), Some(&json!(3)));

        assert!(decode_inputs(None).unwrap().is_none());
    }

    #[test]
    fn test_decode_inputs_rejects_invalid_json() {
        let err = decode_inputs(Some("{key: value}")).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MalformedArgument { flag: "inputs", .. }
        ));
    }

    #[test]
    fn test_decode_inputs_rejects_non_objects() {
        let err = decode_inputs(Some(r#"["a"]"#)).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for --inputs"));
    }

    #[test]
    fn test_decode_final_vars() {
        let vars = decode_final_vars(Some(r#"["output_a", "output_b"]"#))
            .unwrap()
            .unwrap();
        assert_eq!(vars, vec!["output_a", "output_b"]);

        let err = decode_final_vars(Some("output_a")).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MalformedArgument {
                flag: "final-vars",
                ..
            }
        ));
    }
}
