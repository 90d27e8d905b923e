#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(GenerateError::Config("x".into()), 2 ; "config")]
#[test_case(GenerateError::SchemaParse("x".into()), 3 ; "schema parse")]
#[test_case(
    GenerateError::UnrecognizedExtension { path: "a.txt".into(), expected: "[.proto]".into() },
    4 ;
    "unrecognized extension"
)]
#[test_case(GenerateError::UnsupportedEntity("x".into()), 5 ; "unsupported entity")]
#[test_case(GenerateError::UnsupportedMode("x".into()), 6 ; "unsupported mode")]
#[test_case(
    GenerateError::Io { path: "out.h".into(), source: std::io::Error::other("disk full") },
    7 ;
    "io"
)]
fn GenerateError___variant___maps_to_exit_code(error: GenerateError, expected: i32) {
    assert_eq!(error.error_code(), expected);
}

#[test]
fn GenerateError___config___displays_message() {
    let err = GenerateError::Config("header_out is required".into());

    assert_eq!(
        err.to_string(),
        "configuration error: header_out is required"
    );
}

#[test]
fn GenerateError___unrecognized_extension___names_path_and_extensions() {
    let err = GenerateError::UnrecognizedExtension {
        path: "pkg/a.txt".into(),
        expected: "[.proto]".into(),
    };

    let display = err.to_string();

    assert!(display.contains("pkg/a.txt"));
    assert!(display.contains(".proto"));
}

#[test]
fn GenerateError___from_schema_syntax___becomes_schema_parse() {
    let schema_err = protobind_schema::ProtoFileInfo::parse("bad.proto", "message {")
        .unwrap_err();

    let err: GenerateError = schema_err.into();

    assert!(matches!(err, GenerateError::SchemaParse(ref m) if m.starts_with("bad.proto:1")));
}

#[test]
fn GenerateError___from_schema_unsupported_entity___keeps_kind() {
    let schema_err =
        protobind_schema::ProtoFileInfo::parse("odd.proto", "gadget G {}").unwrap_err();

    let err: GenerateError = schema_err.into();

    assert!(matches!(err, GenerateError::UnsupportedEntity(_)));
    assert!(err.to_string().contains("gadget"));
}

#[test]
fn GenerateError___from_toml_error___becomes_config() {
    let toml_err = toml::from_str::<toml::Table>("= broken").unwrap_err();

    let err: GenerateError = toml_err.into();

    assert!(matches!(err, GenerateError::Config(_)));
}
