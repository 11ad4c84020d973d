//! Canonical JSON encoding for deterministic serialization.
//!
//! Rules:
//! - Object keys sorted lexicographically at every nesting level
//! - No insignificant whitespace
//! - Array element order preserved
//! - UTF-8 output, JSON.stringify-compatible string escaping
//!
//! This is the single normalization step feeding both hashing and signing.
//! The same logical value always produces identical bytes, regardless of
//! the order its keys were originally constructed in.

use serde::Serialize;
use serde_json::Value;

use crate::error::PostError;

/// Encode any serializable value to canonical bytes.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PostError> {
    let value = serde_json::to_value(value)?;
    Ok(value_bytes(&value))
}

/// Encode an already-materialized JSON value to canonical bytes.
pub fn value_bytes(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

/// Recursively encode a JSON value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            // serde_json's number formatting is locale-independent and
            // stable across calls, which is all the encoding requires.
            buf.extend_from_slice(n.to_string().as_bytes());
        }
        Value::String(s) => encode_string(buf, s),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                encode_value_to(buf, item);
            }
            buf.push(b']');
        }
        Value::Object(map) => encode_object_canonical(buf, map),
    }
}

/// Encode an object with keys sorted lexicographically.
///
/// serde_json's default map is already ordered, but the sort here makes the
/// canonical property independent of how the map was built (insertion order,
/// `preserve_order` feature, hand-assembled values).
fn encode_object_canonical(buf: &mut Vec<u8>, map: &serde_json::Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    buf.push(b'{');
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        encode_string(buf, key);
        buf.push(b':');
        encode_value_to(buf, value);
    }
    buf.push(b'}');
}

/// Encode a string with JSON.stringify-compatible escaping.
fn encode_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for c in s.chars() {
        match c {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\u{0008}' => buf.extend_from_slice(b"\\b"),
            '\u{000c}' => buf.extend_from_slice(b"\\f"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 => {
                let mut escape = [0u8; 6];
                escape[0] = b'\\';
                escape[1] = b'u';
                let hex = format!("{:04x}", c as u32);
                escape[2..].copy_from_slice(hex.as_bytes());
                buf.extend_from_slice(&escape);
            }
            c => {
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    buf.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encoding_deterministic() {
        let value = json!({
            "username": "alice",
            "seq": 3,
            "prev": null,
            "mentions": ["abc.png", "def"],
        });

        let bytes1 = value_bytes(&value);
        let bytes2 = value_bytes(&value);
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_keys_sorted_independent_of_insertion_order() {
        let mut a = serde_json::Map::new();
        a.insert("zebra".into(), json!(1));
        a.insert("alpha".into(), json!(2));

        let mut b = serde_json::Map::new();
        b.insert("alpha".into(), json!(2));
        b.insert("zebra".into(), json!(1));

        assert_eq!(value_bytes(&Value::Object(a)), value_bytes(&Value::Object(b)));
    }

    #[test]
    fn test_no_whitespace() {
        let value = json!({ "a": [1, 2], "b": { "c": "d" } });
        let encoded = String::from_utf8(value_bytes(&value)).unwrap();
        assert_eq!(encoded, r#"{"a":[1,2],"b":{"c":"d"}}"#);
    }

    #[test]
    fn test_nested_keys_sorted() {
        let value = json!({ "outer": { "b": 1, "a": 2 } });
        let encoded = String::from_utf8(value_bytes(&value)).unwrap();
        assert_eq!(encoded, r#"{"outer":{"a":2,"b":1}}"#);
    }

    #[test]
    fn test_array_order_preserved() {
        let value = json!(["c", "a", "b"]);
        let encoded = String::from_utf8(value_bytes(&value)).unwrap();
        assert_eq!(encoded, r#"["c","a","b"]"#);
    }

    #[test]
    fn test_string_escaping() {
        let value = json!("quote \" slash \\ newline \n tab \t bell \u{0007}");
        let encoded = String::from_utf8(value_bytes(&value)).unwrap();
        assert_eq!(encoded, r#""quote \" slash \\ newline \n tab \t bell \u0007""#);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(value_bytes(&json!(null)), b"null");
        assert_eq!(value_bytes(&json!(true)), b"true");
        assert_eq!(value_bytes(&json!(false)), b"false");
        assert_eq!(value_bytes(&json!(42)), b"42");
        assert_eq!(value_bytes(&json!(-7)), b"-7");
    }

    #[test]
    fn test_serializable_struct() {
        #[derive(serde::Serialize)]
        struct Thing {
            z: u32,
            a: &'static str,
        }

        let bytes = canonical_bytes(&Thing { z: 9, a: "x" }).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":"x","z":9}"#);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insertion_order_never_matters(
                pairs in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 1..8)
            ) {
                let forward: serde_json::Map<String, Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();
                let reversed: serde_json::Map<String, Value> = pairs
                    .iter()
                    .rev()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();

                prop_assert_eq!(
                    value_bytes(&Value::Object(forward)),
                    value_bytes(&Value::Object(reversed))
                );
            }
        }
    }
}
