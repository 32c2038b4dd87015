use super::*;
use crate::types::{CallAction, SaveRecordBody, SearchBody};
use serde_json::json;

#[test]
fn search_body_encodes_in_declaration_order() {
    let body = SearchBody { count: Some(5), ..SearchBody::new("mondago") };
    assert_eq!(encode(&body).expect("encode"), "query=mondago&count=5");
}

#[test]
fn zero_count_is_omitted() {
    let body = SearchBody { count: Some(0), ..SearchBody::new("x") };
    assert_eq!(encode(&body).expect("encode"), "query=x");
}

#[test]
fn all_falsy_values_are_dropped() {
    let body = json!({ "a": null, "b": false, "c": 0, "d": "", "e": 0.0, "keep": "yes" });
    assert_eq!(encode(&body).expect("encode"), "keep=yes");
}

#[test]
fn truthy_scalars_are_stringified() {
    let body = json!({ "flag": true, "n": -3, "f": 2.5, "whole": 7.0 });
    assert_eq!(encode(&body).expect("encode"), "flag=true&n=-3&f=2.5&whole=7");
}

#[test]
fn reserved_characters_are_escaped() {
    let body = json!({ "query": "a b&c=d/é" });
    assert_eq!(encode(&body).expect("encode"), "query=a+b%26c%3Dd%2F%C3%A9");
}

#[test]
fn arrays_join_with_commas() {
    let body = json!({ "ids": ["a", 1, null] });
    assert_eq!(encode(&body).expect("encode"), "ids=a%2C1%2C");
}

#[test]
fn unit_and_none_encode_empty() {
    assert_eq!(encode(&()).expect("encode"), "");
    assert_eq!(encode(&Option::<CallAction>::None).expect("encode"), "");
}

#[test]
fn non_object_body_is_rejected() {
    let err = encode(&json!(["a", "b"])).expect_err("array body should fail");
    assert!(matches!(err, Error::InvalidBody(_)));
}

#[test]
fn save_record_puts_record_type_first() {
    let mut fields = serde_json::Map::new();
    fields.insert("FirstName".into(), json!("Ada"));
    fields.insert("Notes".into(), json!(""));
    fields.insert("LastName".into(), json!("Lovelace"));
    let body = SaveRecordBody { record_type_id: "contact".into(), fields };

    assert_eq!(
        encode(&body).expect("encode"),
        "RecordTypeId=contact&FirstName=Ada&LastName=Lovelace"
    );
}

#[test]
fn call_action_uses_camel_case_key() {
    assert_eq!(encode(&CallAction::new("c-1")).expect("encode"), "callId=c-1");
}
