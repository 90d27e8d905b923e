#![allow(non_snake_case)]

use super::*;

#[test]
fn init___called_twice___keeps_first_subscriber() {
    init(Some("debug")).unwrap();

    init(Some("warn")).unwrap();
}

#[test]
fn init___without_level___falls_back_to_default_filter() {
    init(None).unwrap();
}

#[test]
fn init___invalid_level___returns_error() {
    let err = init(Some("protobind=loudest")).unwrap_err();

    assert!(err.to_string().contains("--log_level"));
}
