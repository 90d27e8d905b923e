//! protobind-schema - Protocol buffer schema reader
//!
//! This crate provides the descriptor-reading side of protobind:
//! - [`SchemaFile`] trait exposing a file's package and top-level entities
//! - [`ProtoFileInfo`] reading `.proto` source text into a [`SchemaFile`]
//! - [`SchemaError`] for read and parse failures
//! - [`strip_source_roots`] for turning build paths into schema-relative names

mod error;
mod lexer;
mod paths;
mod proto_file;

pub use error::{SchemaError, SchemaResult};
pub use paths::strip_source_roots;
pub use proto_file::{ProtoFileInfo, SchemaEntity, SchemaFile};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ProtoFileInfo, SchemaEntity, SchemaError, SchemaFile, SchemaResult};
}
