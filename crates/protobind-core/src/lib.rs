//! protobind-core - Descriptor-to-binding code generation
//!
//! This crate turns protocol buffer schemas into C++ glue exposing the
//! schema's types to Python through CLIF:
//! - [`build_descriptors`] normalizes schema entities into [`BindingDescriptor`]s
//! - [`group_adjacent`] / [`group_sorted`] arrange them into namespace blocks
//! - [`Renderer`] implementations emit the header and source lines
//! - [`Generator`] drives a whole run from a [`GeneratorConfig`]
//!
//! ```text
//! schema → descriptors → namespace groups → renderer → header + source
//! ```

mod config;
mod descriptor;
mod error;
mod generate;
mod grouping;
pub mod naming;
pub mod render;
pub mod writer;

pub use config::{BuildVariant, GeneratorConfig, Mode};
pub use descriptor::{
    BindingDescriptor, BuildOptions, EntityKind, FALLBACK_NAMESPACE, NamespacePath,
    ROOT_NAMESPACE, build_descriptors,
};
pub use error::{GenerateError, GenerateResult};
pub use generate::{GeneratedFiles, Generator, generate};
pub use grouping::{NamespaceGroup, group_adjacent, group_sorted};
pub use render::{Dialect, RenderContext, RenderedOutput, Renderer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BindingDescriptor, Dialect, EntityKind, GenerateError, GenerateResult, GeneratorConfig,
        Generator, Mode, Renderer,
    };
}
