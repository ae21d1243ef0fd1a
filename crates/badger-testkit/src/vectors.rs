//! Scenario vectors: documents with the outcome every implementation must
//! produce.
//!
//! Each malformed input maps to exactly one error kind, so callers can tell
//! a bad record from an unreachable one.

use badger_core::ErrorKind;

/// A record document and what key extraction yields.
#[derive(Debug, Clone)]
pub struct RecordVector {
    pub name: &'static str,
    pub record: &'static str,
    /// `None` when extraction succeeds.
    pub error: Option<ErrorKind>,
}

/// A badge document and what import yields.
#[derive(Debug, Clone)]
pub struct BadgeVector {
    pub name: &'static str,
    pub json: &'static str,
    pub error: Option<ErrorKind>,
}

/// Expected outcome of a `name_show` exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(&'static str),
    Error(ErrorKind),
}

/// A name-service reply and how resolution interprets it.
#[derive(Debug, Clone)]
pub struct EnvelopeVector {
    pub name: &'static str,
    pub status: u16,
    pub body: &'static str,
    pub outcome: Outcome,
}

/// Record extraction vectors.
pub fn record_vectors() -> Vec<RecordVector> {
    vec![
        RecordVector {
            name: "not json",
            record: "dsa=abc",
            error: Some(ErrorKind::ParseError),
        },
        RecordVector {
            name: "json array",
            record: r#"["dsa"]"#,
            error: Some(ErrorKind::SchemaError),
        },
        RecordVector {
            name: "missing dsa",
            record: r#"{"email":"alice@example.org"}"#,
            error: Some(ErrorKind::SchemaError),
        },
        RecordVector {
            name: "dsa not a string",
            record: r#"{"dsa":42}"#,
            error: Some(ErrorKind::SchemaError),
        },
        RecordVector {
            name: "dsa not base64",
            record: r#"{"dsa":"not base64!"}"#,
            error: Some(ErrorKind::Base64Error),
        },
        RecordVector {
            name: "dsa not a key",
            record: r#"{"dsa":"aGVsbG8gd29ybGQ="}"#,
            error: Some(ErrorKind::KeyFormatError),
        },
    ]
}

/// Badge import vectors.
pub fn badge_vectors() -> Vec<BadgeVector> {
    vec![
        BadgeVector {
            name: "well formed",
            json: r#"{"id":"nmc:alice","token":"YWFh","signature":"c2ln"}"#,
            error: None,
        },
        BadgeVector {
            name: "truncated",
            json: r#"{"id":"nmc:alice","token":"#,
            error: Some(ErrorKind::ParseError),
        },
        BadgeVector {
            name: "not an object",
            json: "null",
            error: Some(ErrorKind::SchemaError),
        },
        BadgeVector {
            name: "missing signature",
            json: r#"{"id":"nmc:alice","token":"YWFh"}"#,
            error: Some(ErrorKind::SchemaError),
        },
        BadgeVector {
            name: "locator without scheme",
            json: r#"{"id":"alice","token":"YWFh","signature":"c2ln"}"#,
            error: Some(ErrorKind::SchemaError),
        },
        BadgeVector {
            name: "token not base64",
            json: r#"{"id":"nmc:alice","token":"Y W F h","signature":"c2ln"}"#,
            error: Some(ErrorKind::Base64Error),
        },
        BadgeVector {
            name: "empty token",
            json: r#"{"id":"nmc:alice","token":"","signature":"c2ln"}"#,
            error: Some(ErrorKind::SchemaError),
        },
    ]
}

/// Name-service reply vectors.
pub fn envelope_vectors() -> Vec<EnvelopeVector> {
    vec![
        EnvelopeVector {
            name: "value",
            status: 200,
            body: r#"{"result":{"name":"id/alice","value":"{\"dsa\":\"x\"}"},"error":null,"id":null}"#,
            outcome: Outcome::Value(r#"{"dsa":"x"}"#),
        },
        EnvelopeVector {
            name: "both null",
            status: 200,
            body: r#"{"result":null,"error":null,"id":null}"#,
            outcome: Outcome::Error(ErrorKind::NotFoundError),
        },
        EnvelopeVector {
            name: "rpc error with 500",
            status: 500,
            body: r#"{"result":null,"error":{"code":-4,"message":"failed to read from name DB"},"id":null}"#,
            outcome: Outcome::Error(ErrorKind::RpcError),
        },
        EnvelopeVector {
            name: "unauthorized empty body",
            status: 401,
            body: "",
            outcome: Outcome::Error(ErrorKind::FetchError),
        },
        EnvelopeVector {
            name: "html body",
            status: 200,
            body: "<html></html>",
            outcome: Outcome::Error(ErrorKind::ParseError),
        },
        EnvelopeVector {
            name: "no result member",
            status: 200,
            body: r#"{"error":null}"#,
            outcome: Outcome::Error(ErrorKind::SchemaError),
        },
        EnvelopeVector {
            name: "value not a string",
            status: 200,
            body: r#"{"result":{"value":7},"error":null}"#,
            outcome: Outcome::Error(ErrorKind::SchemaError),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use badger_core::{record, Badge};

    #[test]
    fn test_record_vectors() {
        for vector in record_vectors() {
            let actual = record::extract_key(vector.record).err().map(|e| e.kind());
            assert_eq!(actual, vector.error, "{}", vector.name);
        }
    }

    #[test]
    fn test_badge_vectors() {
        for vector in badge_vectors() {
            let actual = Badge::from_json(vector.json).err().map(|e| e.kind());
            assert_eq!(actual, vector.error, "{}", vector.name);
        }
    }
}
