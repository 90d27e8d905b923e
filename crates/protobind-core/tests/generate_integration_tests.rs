//! End-to-end generation runs against schema files on disk.
//!
//! Each test lays out a source tree and an output tree in a temp dir, runs
//! [`Generator::run`] and inspects the files it wrote.

#![allow(non_snake_case)]

use protobind_core::{BuildVariant, GenerateError, Generator, GeneratorConfig, Mode};
use std::fs;
use tempfile::TempDir;

/// Source and output roots for one run.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        Self { dir }
    }

    fn root(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    /// Write `text` to `src/<name>` and return the full path.
    fn add_schema(&self, name: &str, text: &str) -> String {
        let path = self.dir.path().join("src").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, text).unwrap();
        path.to_string_lossy().to_string()
    }

    /// Config writing `bin/<stem>_clif.{h,cc}`.
    fn config(&self, stem: &str) -> GeneratorConfig {
        let root = self.root();
        let out = self.dir.path().join("bin").join(stem);
        fs::create_dir_all(out.parent().unwrap()).unwrap();
        GeneratorConfig {
            source_dir: format!("{root}/src"),
            bin_dir: format!("{root}/bin"),
            header_out: Some(format!("{root}/bin/{stem}_clif.h")),
            ccdeps_out: Some(format!("{root}/bin/{stem}_clif.cc")),
            ..GeneratorConfig::default()
        }
    }

    fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join("bin").join(name)).unwrap()
    }

    fn output_exists(&self, name: &str) -> bool {
        self.dir.path().join("bin").join(name).exists()
    }
}

// =============================================================================
// C-API dialect
// =============================================================================

#[test]
fn run___nested_package_message___writes_namespaced_converters() {
    let ws = Workspace::new();
    let proto = ws.add_schema(
        "pkg/sub/foo.proto",
        r#"
        syntax = "proto3";
        package pkg.sub;

        message Foo {
          int32 id = 1;
        }
        "#,
    );
    let config = ws.config("pkg/sub/foo");

    Generator::new(&config).run(&proto).unwrap();

    let header = ws.read_output("pkg/sub/foo_clif.h");
    let source = ws.read_output("pkg/sub/foo_clif.cc");
    assert!(header.contains("namespace pkg { namespace sub {"));
    assert!(header.contains("::pkg::sub::Foo"));
    assert!(header.contains("}}  // namespace pkg::sub"));
    assert!(header.contains("#include \"pkg/sub/foo.pb.h\""));
    assert!(source.contains("\"pkg.sub.foo_pb2\""));
    assert!(source.contains("#include \"pkg/sub/foo_clif.h\""));
}

#[test]
fn run___nested_types___are_emitted_in_declaration_order() {
    let ws = Workspace::new();
    let proto = ws.add_schema(
        "shop.proto",
        r#"
        package shop;

        message Order {
          enum State { NEW = 0; PAID = 1; }
          message Line { string sku = 1; }
          repeated Line lines = 1;
        }

        enum Currency { EUR = 0; }
        "#,
    );
    let config = ws.config("shop");

    Generator::new(&config).run(&proto).unwrap();

    let header = ws.read_output("shop_clif.h");
    let order = header.find("`::shop::Order` as Order").unwrap();
    let line = header.find("`::shop::Order::Line` as Order.Line").unwrap();
    let state = header.find("`::shop::Order::State` as Order.State").unwrap();
    let currency = header.find("`::shop::Currency` as Currency").unwrap();
    assert!(order < line);
    assert!(line < state);
    assert!(state < currency);
}

#[test]
fn run___services___only_with_service_info() {
    let ws = Workspace::new();
    let text = r#"
        package rpc;
        message Ping {}
        service Echo {
          rpc Call (Ping) returns (Ping);
        }
    "#;
    let proto = ws.add_schema("rpc/echo.proto", text);
    let plain = ws.config("rpc/echo");
    let with_services = GeneratorConfig {
        generate_service_info: true,
        ..ws.config("rpc/echo")
    };

    Generator::new(&plain).run(&proto).unwrap();
    let without = ws.read_output("rpc/echo_clif.cc");
    Generator::new(&with_services).run(&proto).unwrap();
    let with = ws.read_output("rpc/echo_clif.cc");

    assert!(!without.contains("::rpc::Echo"));
    assert!(with.contains("::rpc::Echo"));
    assert!(with.contains("PyCapsule_New"));
}

// =============================================================================
// Package handling
// =============================================================================

#[test]
fn run___empty_package___fails_with_config_error() {
    let ws = Workspace::new();
    let proto = ws.add_schema("bare.proto", "message Foo {}\n");
    let config = ws.config("bare");

    let err = Generator::new(&config).run(&proto).unwrap_err();

    assert!(matches!(err, GenerateError::Config(ref m) if m.contains("bare")));
    assert_eq!(err.error_code(), 2);
    assert!(!ws.output_exists("bare_clif.h"));
    assert!(!ws.output_exists("bare_clif.cc"));
}

#[test]
fn run___empty_package_allowed___uses_fallback_namespace() {
    let ws = Workspace::new();
    let proto = ws.add_schema("bare.proto", "message Foo {}\n");
    let config = GeneratorConfig {
        allow_empty_package: true,
        ..ws.config("bare")
    };

    Generator::new(&config).run(&proto).unwrap();

    let header = ws.read_output("bare_clif.h");
    assert!(header.contains("namespace clif {"));
    assert!(header.contains("}  // namespace clif"));
    assert!(header.contains("`::Foo` as Foo"));
}

// =============================================================================
// pybind11 dialect
// =============================================================================

#[test]
fn run___pybind11_internal___sorts_and_forwards() {
    let ws = Workspace::new();
    let proto = ws.add_schema(
        "pkg/sub/ab.proto",
        "package pkg.sub;\nmessage B {}\nmessage A {}\n",
    );
    let config = GeneratorConfig {
        pyclif_codegen_mode: Mode::Pybind11,
        build_variant: BuildVariant::Internal,
        ..ws.config("pkg/sub/ab")
    };

    Generator::new(&config).run(&proto).unwrap();

    let header = ws.read_output("pkg/sub/ab_clif.h");
    let source = ws.read_output("pkg/sub/ab_clif.cc");
    let a = header.find("::pkg::sub::A").unwrap();
    let b = header.find("::pkg::sub::B").unwrap();
    assert!(a < b);
    assert!(!header.contains("return "));
    assert!(!source.contains("GetCopy"));
    assert!(source.contains("ForwardAs"));
}

#[test]
fn run___pybind11_open_source___fails_without_writing() {
    let ws = Workspace::new();
    let proto = ws.add_schema("pkg/a.proto", "package pkg;\nmessage A {}\n");
    let config = GeneratorConfig {
        pyclif_codegen_mode: Mode::Pybind11,
        ..ws.config("pkg/a")
    };

    let err = Generator::new(&config).run(&proto).unwrap_err();

    assert!(matches!(err, GenerateError::UnsupportedMode(_)));
    assert!(!ws.output_exists("pkg/a_clif.h"));
}

// =============================================================================
// Input errors
// =============================================================================

#[test]
fn run___unknown_top_level_keyword___returns_unsupported_entity() {
    let ws = Workspace::new();
    let proto = ws.add_schema("pkg/odd.proto", "package pkg;\nwidget W {}\n");
    let config = ws.config("pkg/odd");

    let err = Generator::new(&config).run(&proto).unwrap_err();

    assert!(matches!(err, GenerateError::UnsupportedEntity(_)));
}

#[test]
fn run___syntax_error___reports_file_and_line() {
    let ws = Workspace::new();
    let proto = ws.add_schema("pkg/bad.proto", "package pkg;\n\nmessage {\n");
    let config = ws.config("pkg/bad");

    let err = Generator::new(&config).run(&proto).unwrap_err();

    assert!(matches!(err, GenerateError::SchemaParse(ref m) if m.starts_with("pkg/bad.proto:")));
}

#[test]
fn run___rerun___output_is_identical() {
    let ws = Workspace::new();
    let proto = ws.add_schema(
        "pkg/foo.proto",
        "package pkg;\nmessage Foo {}\nenum E { X = 0; }\n",
    );
    let config = ws.config("pkg/foo");

    Generator::new(&config).run(&proto).unwrap();
    let first = ws.read_output("pkg/foo_clif.h");
    Generator::new(&config).run(&proto).unwrap();
    let second = ws.read_output("pkg/foo_clif.h");

    assert_eq!(first, second);
}
