#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use strkit::SboString;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    name: SboString,
    tags: Vec<SboString>,
}

#[test]
fn utf8_content_is_a_json_string() {
    let record = Record {
        name: SboString::from_bytes("a name well past sixteen bytes").unwrap(),
        tags: vec![SboString::from_bytes("x").unwrap(), SboString::new()],
    };
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"name":"a name well past sixteen bytes","tags":["x",""]}"#
    );
    assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), record);
}

#[test]
fn non_utf8_content_is_a_byte_array() {
    let s = SboString::from_bytes(b"\xff\x00A").unwrap();
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, "[255,0,65]");
    assert_eq!(serde_json::from_str::<SboString>(&json).unwrap(), s);
}

#[test]
fn escaped_json_strings_decode() {
    let s: SboString = serde_json::from_str(r#""tab\there é""#).unwrap();
    assert_eq!(s, "tab\there é");
}
