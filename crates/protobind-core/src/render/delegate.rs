//! pybind11 forwarding dialect
//!
//! Declarations match the C-API dialect so CLIF can match the types, but
//! every definition is a single call into the pybind11 native proto caster.
//! Output is sorted by C++ name.

use super::{
    Dialect, NamespaceBlock, POSTCONV_HEADER, RenderContext, RenderedOutput, Renderer,
    header_epilogue, header_prologue, push_banner, push_includes,
};
use crate::descriptor::{BindingDescriptor, EntityKind};
use crate::error::GenerateResult;
use crate::grouping::{NamespaceGroup, group_sorted};

const CASTER_HEADERS: &[&str] = &[
    "third_party/pybind11/include/pybind11/smart_holder.h",
    "third_party/pybind11_protobuf/native_proto_caster.h",
];
const PYBIND11_HEADER: &str = "third_party/pybind11/include/pybind11/pybind11.h";
const FORWARD_AS: &str = "::clif::pybind11::ForwardAs(py, c)";
const FORWARD_FROM: &str = "::clif::pybind11::ForwardFrom(c, pc)";
const POSTCONV: &str = "const ::clif::py::PostConv& pc";

/// Declaration shape selected for an entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclShape {
    /// Value and `unique_ptr` conversions of a proto message
    ProtoMessage,
    /// Conversions of a proto enum by value
    ProtoEnum,
    /// Conversions of an opaque pointer held in a capsule
    Capsule,
}

impl DeclShape {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Message => DeclShape::ProtoMessage,
            EntityKind::Enum => DeclShape::ProtoEnum,
            EntityKind::Service => DeclShape::Capsule,
        }
    }

    /// Function signatures paired with the call they forward to
    fn signatures(self, t: &str) -> Vec<(String, &'static str)> {
        match self {
            DeclShape::ProtoMessage => vec![
                (format!("bool Clif_PyObjAs(PyObject* py, {t}* c)"), FORWARD_AS),
                (
                    format!("bool Clif_PyObjAs(PyObject* py, std::unique_ptr<{t}>* c)"),
                    FORWARD_AS,
                ),
                (
                    format!("PyObject* Clif_PyObjFrom(const {t}& c, {POSTCONV})"),
                    FORWARD_FROM,
                ),
            ],
            DeclShape::ProtoEnum => vec![
                (format!("bool Clif_PyObjAs(PyObject* py, {t}* c)"), FORWARD_AS),
                (format!("PyObject* Clif_PyObjFrom({t} c, {POSTCONV})"), FORWARD_FROM),
            ],
            DeclShape::Capsule => vec![
                (format!("bool Clif_PyObjAs(PyObject* py, {t}** c)"), FORWARD_AS),
                (format!("PyObject* Clif_PyObjFrom({t}* c, {POSTCONV})"), FORWARD_FROM),
            ],
        }
    }
}

/// Renders caster-forwarding declarations sorted by C++ name
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegateRenderer;

impl DelegateRenderer {
    fn render_groups<F>(
        &self,
        out: &mut RenderedOutput,
        descriptors: &[BindingDescriptor],
        member: F,
    ) where
        F: Fn(&BindingDescriptor) -> Vec<String>,
    {
        for group in self.group(descriptors) {
            let block = NamespaceBlock::new(group.namespace());
            out.push("");
            out.push(block.open_line());
            for descriptor in group.members() {
                out.extend(member(descriptor));
            }
            out.push(block.close_line());
        }
    }
}

impl Renderer for DelegateRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::Delegate
    }

    fn group<'a>(&self, descriptors: &'a [BindingDescriptor]) -> Vec<NamespaceGroup<'a>> {
        group_sorted(descriptors)
    }

    fn render_header(
        &self,
        ctx: &RenderContext<'_>,
        descriptors: &[BindingDescriptor],
    ) -> GenerateResult<RenderedOutput> {
        let mut includes = vec![ctx.proto_header, POSTCONV_HEADER];
        includes.extend_from_slice(CASTER_HEADERS);
        let mut out = header_prologue(ctx, &includes);

        self.render_groups(&mut out, descriptors, |d| {
            let shape = DeclShape::for_kind(d.kind());
            let mut lines = vec![format!("// CLIF use `{}` as {}", d.target_name(), d.host_name())];
            lines.extend(
                shape
                    .signatures(d.target_name())
                    .into_iter()
                    .map(|(signature, _)| format!("{signature};")),
            );
            lines
        });

        header_epilogue(&mut out, ctx);
        Ok(out)
    }

    fn render_source(
        &self,
        ctx: &RenderContext<'_>,
        descriptors: &[BindingDescriptor],
    ) -> GenerateResult<RenderedOutput> {
        let mut out = RenderedOutput::new();
        push_banner(&mut out, ctx);
        push_includes(&mut out, &[PYBIND11_HEADER, ctx.header_include]);

        self.render_groups(&mut out, descriptors, |d| {
            DeclShape::for_kind(d.kind())
                .signatures(d.target_name())
                .into_iter()
                .map(|(signature, call)| format!("{signature} {{ return {call}; }}"))
                .collect()
        });

        Ok(out)
    }
}
