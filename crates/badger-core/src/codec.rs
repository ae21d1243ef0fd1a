//! Base64 and JSON helpers shared by keys, badges and records.
//!
//! Base64 output is written into a buffer whose capacity is computed from the
//! exact expansion formula and reserved up front, then checked after encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::{BadgeError, Result, SchemaError};

/// Length of the padded base64 encoding of `len` bytes: `ceil(len / 3) * 4`.
pub fn encoded_len(len: usize) -> Option<usize> {
    len.div_ceil(3).checked_mul(4)
}

/// Encode bytes as standard padded base64.
pub fn encode(bytes: &[u8]) -> Result<String> {
    let expected = encoded_len(bytes.len())
        .ok_or_else(|| BadgeError::Allocation(format!("{} bytes too large to encode", bytes.len())))?;

    let mut out = String::new();
    out.try_reserve_exact(expected)
        .map_err(|e| BadgeError::Allocation(e.to_string()))?;
    STANDARD.encode_string(bytes, &mut out);

    if out.len() != expected {
        return Err(BadgeError::Serialization(format!(
            "base64 output is {} bytes, expected {}",
            out.len(),
            expected
        )));
    }
    Ok(out)
}

/// Decode standard padded base64. `field` names the value in errors.
pub fn decode(field: &'static str, text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|source| BadgeError::Base64 { field, source })
}

/// Parse `text` as a JSON object.
pub fn parse_object(document: &'static str, text: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| BadgeError::Parse { document, source })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SchemaError::NotObject { document }.into()),
    }
}

/// Fetch a required string attribute, distinguishing "missing" from "not a string".
pub fn require_str<'a>(
    object: &'a Map<String, Value>,
    document: &'static str,
    field: &'static str,
) -> std::result::Result<&'a str, SchemaError> {
    match object.get(field) {
        None => Err(SchemaError::Missing { document, field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(SchemaError::NotString { document, field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_encoded_len_formula() {
        assert_eq!(encoded_len(0), Some(0));
        assert_eq!(encoded_len(1), Some(4));
        assert_eq!(encoded_len(2), Some(4));
        assert_eq!(encoded_len(3), Some(4));
        assert_eq!(encoded_len(4), Some(8));
        assert_eq!(encoded_len(64), Some(88));
        assert_eq!(encoded_len(usize::MAX), None);
    }

    #[test]
    fn test_encode_matches_expected_length() {
        for len in 0..50 {
            let bytes = vec![0xA5u8; len];
            let text = encode(&bytes).unwrap();
            assert_eq!(Some(text.len()), encoded_len(len));
            assert_eq!(decode("test", &text).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("token", "not*base64!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Base64Error);
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_parse_object() {
        let map = parse_object("badge", r#"{"id": "nmc:alice"}"#).unwrap();
        assert_eq!(require_str(&map, "badge", "id").unwrap(), "nmc:alice");

        let err = parse_object("badge", "{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);

        let err = parse_object("badge", "[1, 2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaError);
    }

    #[test]
    fn test_require_str_granularity() {
        let map = parse_object("record", r#"{"dsa": 42}"#).unwrap();
        assert_eq!(
            require_str(&map, "record", "dsa"),
            Err(SchemaError::NotString {
                document: "record",
                field: "dsa"
            })
        );
        assert_eq!(
            require_str(&map, "record", "other"),
            Err(SchemaError::Missing {
                document: "record",
                field: "other"
            })
        );
    }
}
