#![allow(non_snake_case)]

use super::*;

fn config_with_outputs(bin_dir: &str, header: &str) -> GeneratorConfig {
    GeneratorConfig {
        bin_dir: bin_dir.into(),
        header_out: Some(header.into()),
        ccdeps_out: Some(format!("{header}.cc")),
        ..GeneratorConfig::default()
    }
}

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert_eq!(config.pyclif_codegen_mode, Mode::CApi);
    assert_eq!(config.build_variant, BuildVariant::OpenSource);
    assert!(!config.allow_empty_package);
    assert!(!config.generate_service_info);
    assert!(config.header_out.is_none());
}

#[test]
fn GeneratorConfig___from_toml_str___parses_all_fields() {
    let toml = r#"
        source_dir = "src"
        bin_dir = "out/bin"
        ccdeps_out = "out/bin/pkg/a_clif.cc"
        header_out = "out/bin/pkg/a_clif.h"
        allow_empty_package = true
        pyclif_codegen_mode = "pybind11"
        generate_service_info = true
    "#;

    let config = GeneratorConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.source_dir, "src");
    assert_eq!(config.bin_dir, "out/bin");
    assert_eq!(config.header_out.as_deref(), Some("out/bin/pkg/a_clif.h"));
    assert!(config.allow_empty_package);
    assert_eq!(config.pyclif_codegen_mode, Mode::Pybind11);
    assert!(config.generate_service_info);
}

#[test]
fn GeneratorConfig___from_empty_toml___returns_defaults() {
    let config = GeneratorConfig::from_toml_str("").unwrap();

    assert_eq!(config.pyclif_codegen_mode, Mode::CApi);
    assert!(config.ccdeps_out.is_none());
}

#[test]
fn GeneratorConfig___from_toml_with_unknown_mode___returns_unsupported_mode() {
    let err = GeneratorConfig::from_toml_str(r#"pyclif_codegen_mode = "cython""#).unwrap_err();

    assert!(matches!(err, GenerateError::UnsupportedMode(ref m) if m.contains("cython")));
    assert_eq!(err.error_code(), 6);
}

#[test]
fn GeneratorConfig___from_file_with_unknown_mode___returns_unsupported_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protobind.toml");
    std::fs::write(&path, "bin_dir = \"out\"\npyclif_codegen_mode = \"cffi\"\n").unwrap();

    let err = GeneratorConfig::from_file(&path).unwrap_err();

    assert!(matches!(err, GenerateError::UnsupportedMode(_)));
}

#[test]
fn GeneratorConfig___mode_of_wrong_type___returns_config_error() {
    let err = GeneratorConfig::from_toml_str("pyclif_codegen_mode = 3").unwrap_err();

    assert!(matches!(err, GenerateError::Config(_)));
}

#[test]
fn GeneratorConfig___malformed_toml___returns_config_error() {
    let err = GeneratorConfig::from_toml_str("bin_dir = ").unwrap_err();

    assert!(matches!(err, GenerateError::Config(_)));
}

#[test]
fn GeneratorConfig___from_missing_file___returns_config_error() {
    let err = GeneratorConfig::from_file("/nonexistent/protobind.toml").unwrap_err();

    assert!(matches!(err, GenerateError::Config(ref m) if m.contains("protobind.toml")));
}

#[test]
fn GeneratorConfig___from_file___reads_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("protobind.toml");
    std::fs::write(&path, "allow_empty_package = true\n").unwrap();

    let config = GeneratorConfig::from_file(&path).unwrap();

    assert!(config.allow_empty_package);
}

#[test]
fn GeneratorConfig___missing_header_out___returns_config_error() {
    let config = GeneratorConfig {
        ccdeps_out: Some("a.cc".into()),
        ..GeneratorConfig::default()
    };

    let err = config.output_paths().unwrap_err();

    assert!(err.to_string().contains("must be specified"));
}

#[test]
fn GeneratorConfig___header_include_path___strips_bin_dir() {
    let config = config_with_outputs("out/bin", "out/bin/pkg/a_clif.h");

    assert_eq!(config.header_include_path().unwrap(), "pkg/a_clif.h");
}

#[test]
fn GeneratorConfig___header_outside_bin_dir___returns_config_error() {
    let config = config_with_outputs("out/bin", "elsewhere/pkg/a_clif.h");

    let err = config.header_include_path().unwrap_err();

    assert!(matches!(err, GenerateError::Config(ref m) if m.contains("not under bin_dir")));
}

#[test]
fn GeneratorConfig___sibling_prefix_of_bin_dir___is_not_nested() {
    let config = config_with_outputs("out/bin", "out/binary/a_clif.h");

    assert!(config.header_include_path().is_err());
}

#[test]
fn GeneratorConfig___bin_dir_with_trailing_slash___returns_config_error() {
    let config = config_with_outputs("out/bin/", "out/bin/a_clif.h");

    let err = config.header_include_path().unwrap_err();

    assert!(err.to_string().contains("must not end with '/'"));
}

#[test]
fn GeneratorConfig___empty_bin_dir___uses_header_path_as_is() {
    let config = config_with_outputs("", "pkg/a_clif.h");

    assert_eq!(config.header_include_path().unwrap(), "pkg/a_clif.h");
}

#[test]
fn GeneratorConfig___strip_roots___skips_empty_roots() {
    let config = GeneratorConfig {
        source_dir: "src".into(),
        ..GeneratorConfig::default()
    };

    assert_eq!(config.strip_roots(), vec!["src"]);
}

#[test]
fn GeneratorConfig___strip_roots___lists_source_before_genfiles() {
    let config = GeneratorConfig {
        source_dir: "src".into(),
        genfiles_dir: "gen".into(),
        ..GeneratorConfig::default()
    };

    assert_eq!(config.strip_roots(), vec!["src", "gen"]);
}
