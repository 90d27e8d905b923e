//! Python C-API conversion function dialect

use super::{
    Dialect, NamespaceBlock, POSTCONV_HEADER, RenderContext, RenderedOutput, Renderer,
    header_epilogue, header_prologue, push_banner, push_includes,
};
use crate::descriptor::{BindingDescriptor, EntityKind, FALLBACK_NAMESPACE};
use crate::error::GenerateResult;
use crate::grouping::{NamespaceGroup, group_adjacent};

const INDENT: &str = "  ";
const RUNTIME_HEADERS: &[&str] = &["clif/python/runtime.h", "clif/python/types.h"];
const POSTCONV: &str = "const ::clif::py::PostConv&";

/// Renders Python C-API converters in schema declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct FullRenderer;

impl Renderer for FullRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::Full
    }

    fn group<'a>(&self, descriptors: &'a [BindingDescriptor]) -> Vec<NamespaceGroup<'a>> {
        group_adjacent(descriptors)
    }

    fn render_header(
        &self,
        ctx: &RenderContext<'_>,
        descriptors: &[BindingDescriptor],
    ) -> GenerateResult<RenderedOutput> {
        let mut out = header_prologue(ctx, &[ctx.proto_header, POSTCONV_HEADER]);

        for group in self.group(descriptors) {
            let block = NamespaceBlock::new(group.namespace());
            out.push("");
            out.push(block.open_line());
            if !block.is_root() {
                out.push(format!("using namespace ::{FALLBACK_NAMESPACE};"));
            }
            out.push("");
            for descriptor in group.members() {
                out.extend(declarations(descriptor));
            }
            out.push("");
            out.push(block.close_line());
        }

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
        push_includes(&mut out, RUNTIME_HEADERS);
        push_includes(&mut out, &[ctx.header_include]);

        for group in self.group(descriptors) {
            let block = NamespaceBlock::new(group.namespace());
            out.push("");
            out.push(block.open_line());
            if !block.is_root() {
                out.push("");
                out.push(format!("using namespace ::{FALLBACK_NAMESPACE};"));
                out.push(format!("using ::{FALLBACK_NAMESPACE}::Clif_PyObjAs;"));
                out.push(format!("using ::{FALLBACK_NAMESPACE}::Clif_PyObjFrom;"));
            }
            for descriptor in group.members() {
                out.extend(converters(descriptor));
            }
            out.push("");
            out.push(block.close_line());
        }

        Ok(out)
    }
}

/// Header declarations for one entity
fn declarations(d: &BindingDescriptor) -> Vec<String> {
    let t = d.target_name();
    let mut lines = vec![format!("// CLIF use `{t}` as {}", d.host_name())];
    match d.kind() {
        EntityKind::Message => {
            lines.push(format!("bool Clif_PyObjAs(PyObject*, {t}*);"));
            lines.push(format!("bool Clif_PyObjAs(PyObject*, std::unique_ptr<{t}>*);"));
            lines.push(format!("PyObject* Clif_PyObjFrom(const {t}&, {POSTCONV});"));
            lines.push(format!(
                "PyObject* Clif_PyObjFrom(std::unique_ptr<const {t}>, {POSTCONV});"
            ));
            lines.push(format!(
                "PyObject* Clif_PyObjFrom(std::unique_ptr<{t}>, {POSTCONV});"
            ));
        }
        EntityKind::Enum => {
            lines.push(format!("bool Clif_PyObjAs(PyObject*, {t}*);"));
            lines.push(format!("PyObject* Clif_PyObjFrom({t}, {POSTCONV});"));
        }
        EntityKind::Service => {
            lines.push(format!("bool Clif_PyObjAs(PyObject*, {t}**);"));
            lines.push(format!("PyObject* Clif_PyObjFrom({t}*, {POSTCONV});"));
        }
    }
    lines.push(String::new());
    lines
}

/// Source definitions for one entity
fn converters(d: &BindingDescriptor) -> Vec<String> {
    match d.kind() {
        EntityKind::Message => message_converters(d),
        EntityKind::Enum => enum_converters(d),
        EntityKind::Service => capsule_converters(d),
    }
}

fn message_converters(d: &BindingDescriptor) -> Vec<String> {
    let t = d.target_name();
    let py = d.host_name();
    let module = d.module_path().unwrap_or_default();
    let lookup = format!("\"{module}\", \"{py}\"");
    vec![
        String::new(),
        format!("// {t} to/from {module}.{py}"),
        format!("bool Clif_PyObjAs(PyObject* py, {t}* c) {{"),
        format!("{INDENT}CHECK(c != nullptr);"),
        format!("{INDENT}return ::clif::proto::GetCopy(py, {lookup}, c);"),
        "}".to_string(),
        format!("bool Clif_PyObjAs(PyObject* py, std::unique_ptr<{t}>* c) {{"),
        format!("{INDENT}CHECK(c != nullptr);"),
        format!("{INDENT}if (!*c) *c = std::make_unique<{t}>();"),
        format!("{INDENT}return ::clif::proto::GetCopy(py, {lookup}, c->get());"),
        "}".to_string(),
        format!("PyObject* Clif_PyObjFrom(const {t}& c, {POSTCONV}) {{"),
        format!("{INDENT}return ::clif::proto::PyProtoFrom(&c, {lookup});"),
        "}".to_string(),
        format!("PyObject* Clif_PyObjFrom(std::unique_ptr<const {t}> c, {POSTCONV}) {{"),
        format!("{INDENT}if (!c) Py_RETURN_NONE;"),
        format!("{INDENT}return ::clif::proto::PyProtoFrom(c.get(), {lookup});"),
        "}".to_string(),
        format!("PyObject* Clif_PyObjFrom(std::unique_ptr<{t}> c, {POSTCONV}) {{"),
        format!("{INDENT}if (!c) Py_RETURN_NONE;"),
        format!("{INDENT}return ::clif::proto::PyProtoFrom(c.get(), {lookup});"),
        "}".to_string(),
    ]
}

fn enum_converters(d: &BindingDescriptor) -> Vec<String> {
    let t = d.target_name();
    let py = d.host_name();
    vec![
        String::new(),
        format!("// {t} to/from int"),
        format!("bool Clif_PyObjAs(PyObject* py, {t}* c) {{"),
        format!("{INDENT}CHECK(c != nullptr);"),
        format!("{INDENT}int v;"),
        format!("{INDENT}if (!Clif_PyObjAs(py, &v)) return false;"),
        format!("{INDENT}if (!{t}_IsValid(v)) {{"),
        format!(
            "{INDENT}{INDENT}PyErr_Format(PyExc_ValueError, \"%d is not a valid {py} value\", v);"
        ),
        format!("{INDENT}{INDENT}return false;"),
        format!("{INDENT}}}"),
        format!("{INDENT}*c = static_cast<{t}>(v);"),
        format!("{INDENT}return true;"),
        "}".to_string(),
        format!("PyObject* Clif_PyObjFrom({t} c, {POSTCONV} pc) {{"),
        format!("{INDENT}return Clif_PyObjFrom(static_cast<int>(c), pc);"),
        "}".to_string(),
    ]
}

fn capsule_converters(d: &BindingDescriptor) -> Vec<String> {
    let t = d.target_name();
    vec![
        String::new(),
        format!("// {t} to/from PyCapsule"),
        format!("bool Clif_PyObjAs(PyObject* py, {t}** c) {{"),
        format!("{INDENT}CHECK(c != nullptr);"),
        format!("{INDENT}void* p = PyCapsule_GetPointer(py, \"{t}\");"),
        format!("{INDENT}if (p == nullptr) return false;"),
        format!("{INDENT}*c = static_cast<{t}*>(p);"),
        format!("{INDENT}return true;"),
        "}".to_string(),
        format!("PyObject* Clif_PyObjFrom({t}* c, {POSTCONV}) {{"),
        format!("{INDENT}if (c == nullptr) Py_RETURN_NONE;"),
        format!("{INDENT}return PyCapsule_New(c, \"{t}\", nullptr);"),
        "}".to_string(),
    ]
}
