//! JSON text for command-line flags
//!
//! FlowerPower's CLI receives structured flags as JSON strings. They are
//! written the way Python's `json.dumps` writes them by default: `", "`
//! between items, `": "` between key and value, keys in insertion order,
//! non-ASCII characters as `\uXXXX` escapes.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                // Astral characters become a surrogate pair
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` as single-line JSON with spaced separators
pub fn to_flag_json<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_separators() {
        let text = to_flag_json(&json!({"key": "value"})).unwrap();
        assert_eq!(text, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_array_separators() {
        let text = to_flag_json(&vec!["output_a", "output_b"]).unwrap();
        assert_eq!(text, r#"["output_a", "output_b"]"#);
    }

    #[test]
    fn test_nested_values_keep_insertion_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"zeta": [1, 2.5], "alpha": {"on": true, "off": null}}"#)
                .unwrap();

        let text = to_flag_json(&value).unwrap();
        assert_eq!(
            text,
            r#"{"zeta": [1, 2.5], "alpha": {"on": true, "off": null}}"#
        );
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let text = to_flag_json(&json!({"city": "Zürich", "mood": "ok 😀"})).unwrap();
        assert_eq!(
            text,
            r#"{"city": "Z\u00fcrich", "mood": "ok \ud83d\ude00"}"#
        );

        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["city"], "Zürich");
    }

    #[test]
    fn test_control_characters_keep_short_escapes() {
        let text = to_flag_json(&json!(["a\"b\nc"])).unwrap();
        assert_eq!(text, r#"["a\"b\nc"]"#);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_flag_json(&json!({})).unwrap(), "{}");
        assert_eq!(to_flag_json(&json!([])).unwrap(), "[]");
    }
}
