//! Identity records: `{ "dsa": "<base64 public key>" }`.
//!
//! A record is what a resolver produces for a locator. The attribute name is
//! fixed by the record format and does not describe the key algorithm.

use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::codec;
use crate::error::{BadgeError, Result};
use crate::key::{Key, KeyPart};

/// Attribute holding the base64 public key.
pub const RECORD_KEY_FIELD: &str = "dsa";

const DOCUMENT: &str = "record";

/// Extract the public key from a record document.
///
/// The result never carries a private half, even when the record holds one.
pub fn extract_key(record: &str) -> Result<Key> {
    let object = codec::parse_object(DOCUMENT, record)?;
    let encoded = codec::require_str(&object, DOCUMENT, RECORD_KEY_FIELD)?;
    let data = Zeroizing::new(codec::decode(RECORD_KEY_FIELD, encoded)?);
    Ok(Key::import(&data)?.public())
}

/// Build the record document publishing the public half of `key`.
pub fn to_record(key: &Key) -> Result<String> {
    let encoded = key.encode(KeyPart::Public)?;
    let mut document = Map::new();
    document.insert(
        RECORD_KEY_FIELD.to_owned(),
        Value::String(encoded.as_str().to_owned()),
    );
    serde_json::to_string(&document).map_err(|e| BadgeError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SchemaError};

    #[test]
    fn test_record_roundtrip() {
        let key = Key::generate("secret").unwrap();
        let record = to_record(&key).unwrap();

        let extracted = extract_key(&record).unwrap();
        assert!(!extracted.has_private());
        assert_eq!(extracted.fingerprint(), key.fingerprint());
    }

    #[test]
    fn test_record_never_contains_private_key() {
        let key = Key::generate("secret").unwrap();
        let private = key.encode(KeyPart::Private).unwrap();
        let record = to_record(&key).unwrap();
        assert!(!record.contains(private.as_str()));
    }

    #[test]
    fn test_extract_drops_published_private_key() {
        let key = Key::generate("secret").unwrap();
        let private = key.encode(KeyPart::Private).unwrap();
        let record = format!(r#"{{"dsa":"{}"}}"#, private.as_str());

        let extracted = extract_key(&record).unwrap();
        assert!(!extracted.has_private());
        assert_eq!(extracted.fingerprint(), key.fingerprint());
    }

    #[test]
    fn test_extract_ignores_other_fields() {
        let key = Key::random();
        let public = key.encode(KeyPart::Public).unwrap();
        let record = format!(
            r#"{{"email":"alice@example.org","dsa":"{}","info":{{"a":1}}}}"#,
            public.as_str()
        );
        assert_eq!(extract_key(&record).unwrap().fingerprint(), key.fingerprint());
    }

    #[test]
    fn test_extract_error_granularity() {
        let err = extract_key("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);

        let err = extract_key(r#""just a string""#).unwrap_err();
        assert!(matches!(
            err,
            BadgeError::Schema(SchemaError::NotObject { document: "record" })
        ));

        let err = extract_key(r#"{"rsa":"abc"}"#).unwrap_err();
        assert!(matches!(
            err,
            BadgeError::Schema(SchemaError::Missing { field: "dsa", .. })
        ));

        let err = extract_key(r#"{"dsa":["abc"]}"#).unwrap_err();
        assert!(matches!(
            err,
            BadgeError::Schema(SchemaError::NotString { field: "dsa", .. })
        ));

        let err = extract_key(r#"{"dsa":"@@@"}"#).unwrap_err();
        assert!(matches!(err, BadgeError::Base64 { field: "dsa", .. }));

        let err = extract_key(r#"{"dsa":"aGVsbG8="}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyFormatError);
    }
}
