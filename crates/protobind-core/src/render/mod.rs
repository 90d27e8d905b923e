//! Dialect renderers for generated binding code.
//!
//! Both dialects share one pipeline: descriptors are grouped by namespace,
//! each group is wrapped in a [`NamespaceBlock`], and the members are
//! rendered by a dialect-specific [`Renderer`].
//!
//! # Dialects
//!
//! - **Full** ([`FullRenderer`]): Python C-API conversion functions for
//!   every entity, in schema declaration order.
//! - **Delegate** ([`DelegateRenderer`]): declarations whose definitions
//!   forward to the pybind11 native proto caster, sorted by C++ name.
//!
//! # Output layout
//!
//! ```text
//! header: banner, include guard, includes, namespace blocks of declarations
//! source: banner, includes (runtime + header), namespace blocks of definitions
//! ```

mod delegate;
mod full;

pub use delegate::{DeclShape, DelegateRenderer};
pub use full::FullRenderer;

use crate::descriptor::{BindingDescriptor, NamespacePath};
use crate::error::GenerateResult;
use crate::grouping::NamespaceGroup;
use crate::naming;
use crate::writer;
use std::io;

/// Header declaring the CLIF post-conversion options
pub(crate) const POSTCONV_HEADER: &str = "clif/python/postconv.h";

/// Output style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Python C-API conversion functions
    Full,
    /// Forwarding declarations for an external caster
    Delegate,
}

impl Dialect {
    /// The renderer implementing this dialect
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Dialect::Full => Box::new(FullRenderer),
            Dialect::Delegate => Box::new(DelegateRenderer),
        }
    }
}

/// Paths the renderers reference in banners and include directives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext<'a> {
    /// Schema file name, relative to the source root
    pub schema_name: &'a str,
    /// Include path of the protobuf-generated C++ header
    pub proto_header: &'a str,
    /// Include path of the header being generated
    pub header_include: &'a str,
}

/// Produces header and source lines for one dialect
pub trait Renderer {
    fn dialect(&self) -> Dialect;

    /// Order and group descriptors for emission
    fn group<'a>(&self, descriptors: &'a [BindingDescriptor]) -> Vec<NamespaceGroup<'a>>;

    fn render_header(
        &self,
        ctx: &RenderContext<'_>,
        descriptors: &[BindingDescriptor],
    ) -> GenerateResult<RenderedOutput>;

    fn render_source(
        &self,
        ctx: &RenderContext<'_>,
        descriptors: &[BindingDescriptor],
    ) -> GenerateResult<RenderedOutput>;
}

/// Lines destined for one output file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedOutput {
    lines: Vec<String>,
}

impl RenderedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// File contents: every line terminated by a newline
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Write every line, newline-terminated, to `out`
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writer::write_lines(out, &self.lines)
    }
}

/// Open/close constructs for one namespace
#[derive(Debug, Clone, Copy)]
pub struct NamespaceBlock<'a> {
    path: &'a NamespacePath,
}

impl<'a> NamespaceBlock<'a> {
    pub fn new(path: &'a NamespacePath) -> Self {
        Self { path }
    }

    /// `namespace a { namespace b {`
    pub fn open_line(&self) -> String {
        self.path
            .segments()
            .map(|segment| format!("namespace {segment} {{"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `}}  // namespace a::b`
    pub fn close_line(&self) -> String {
        format!(
            "{}  // namespace {}",
            "}".repeat(self.path.depth()),
            self.path.emitted_name()
        )
    }

    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }
}

/// Banner identifying the generator and the schema
pub(crate) fn push_banner(out: &mut RenderedOutput, ctx: &RenderContext<'_>) {
    let rule = "/".repeat(70);
    out.push(rule.clone());
    out.push("// This file was automatically generated by protobind.");
    out.push("// DO NOT EDIT.");
    out.push(rule);
    out.push(format!("// source: {}", ctx.schema_name));
    out.push("");
}

pub(crate) fn push_includes(out: &mut RenderedOutput, headers: &[&str]) {
    for header in headers {
        out.push(format!("#include \"{header}\""));
    }
}

/// Banner, include guard and includes that open every header
pub(crate) fn header_prologue(ctx: &RenderContext<'_>, includes: &[&str]) -> RenderedOutput {
    let guard = naming::include_guard(ctx.header_include);
    let mut out = RenderedOutput::new();
    push_banner(&mut out, ctx);
    out.push(format!("#ifndef {guard}"));
    out.push(format!("#define {guard}"));
    out.push("");
    push_includes(&mut out, includes);
    out
}

pub(crate) fn header_epilogue(out: &mut RenderedOutput, ctx: &RenderContext<'_>) {
    out.push("");
    out.push(format!(
        "#endif  // {}",
        naming::include_guard(ctx.header_include)
    ));
}
