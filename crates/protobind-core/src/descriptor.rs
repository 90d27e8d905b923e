//! Binding descriptors built from schema files
//!
//! A [`BindingDescriptor`] is the normalized form of one schema entity: the
//! names it is known by on both sides of the binding and the namespace it is
//! emitted into. Descriptors are built once per run and never mutated.

use crate::error::{GenerateError, GenerateResult};
use crate::naming;
use protobind_schema::{SchemaEntity, SchemaFile};
use serde::Serialize;
use std::fmt;

/// Namespace used in place of the root namespace when emitting code
pub const FALLBACK_NAMESPACE: &str = "clif";

/// Marker for the root (empty-package) namespace
pub const ROOT_NAMESPACE: &str = "::";

/// Kind of schema entity a descriptor was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Message,
    Enum,
    Service,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Message => write!(f, "message"),
            EntityKind::Enum => write!(f, "enum"),
            EntityKind::Service => write!(f, "service"),
        }
    }
}

/// A C++ namespace prefix such as `::pkg::sub::`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NamespacePath(String);

impl NamespacePath {
    /// Namespace for a dotted schema package
    pub fn from_package(package: &str) -> Self {
        Self(naming::namespace_prefix(package))
    }

    /// The root namespace
    pub fn root() -> Self {
        Self(ROOT_NAMESPACE.to_string())
    }

    /// Raw prefix, `::` for the root
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root namespace
    pub fn is_root(&self) -> bool {
        self.emitted_trimmed().is_empty()
    }

    /// Name used in emitted code: `pkg::sub`, or [`FALLBACK_NAMESPACE`] for the root
    pub fn emitted_name(&self) -> &str {
        match self.emitted_trimmed() {
            "" => FALLBACK_NAMESPACE,
            name => name,
        }
    }

    /// Namespace segments to open, never empty
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.emitted_name().split("::")
    }

    /// Number of nested namespaces the path opens
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    fn emitted_trimmed(&self) -> &str {
        self.0.trim_matches(':')
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized description of one schema entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingDescriptor {
    kind: EntityKind,
    target_name: String,
    host_name: String,
    namespace_path: NamespacePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_path: Option<String>,
}

impl BindingDescriptor {
    /// Descriptor for a message, importable from `module_path`
    pub fn message(
        target_name: impl Into<String>,
        host_name: impl Into<String>,
        namespace_path: NamespacePath,
        module_path: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntityKind::Message,
            target_name: target_name.into(),
            host_name: host_name.into(),
            namespace_path,
            module_path: Some(module_path.into()),
        }
    }

    /// Descriptor for an enum or service
    pub fn new(
        kind: EntityKind,
        target_name: impl Into<String>,
        host_name: impl Into<String>,
        namespace_path: NamespacePath,
    ) -> Self {
        Self {
            kind,
            target_name: target_name.into(),
            host_name: host_name.into(),
            namespace_path,
            module_path: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Fully-qualified C++ name, e.g. `::pkg::sub::Type`
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Name visible from Python, relative to the package
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn namespace_path(&self) -> &NamespacePath {
        &self.namespace_path
    }

    /// Python module to import; set for messages only
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }
}

/// Options for [`build_descriptors`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail on schemas without a package
    pub package_required: bool,
    /// Include services
    pub generate_service_info: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            package_required: true,
            generate_service_info: false,
        }
    }
}

/// Build descriptors for every entity in `schema`.
///
/// `schema_stem` is the schema path relative to the source root, without
/// its extension; it names the Python module messages are imported from.
/// Descriptors are returned in declaration order: messages, enums, then
/// services when enabled.
pub fn build_descriptors(
    schema: &dyn SchemaFile,
    schema_stem: &str,
    options: BuildOptions,
) -> GenerateResult<Vec<BindingDescriptor>> {
    let package = schema.package_name();
    let namespace = if package.is_empty() {
        if options.package_required {
            return Err(GenerateError::Config(format!(
                "proto with empty package: {schema_stem} (generated converters would \
                 land in ::{FALLBACK_NAMESPACE}, where argument-dependent lookup cannot \
                 find them; pass allow_empty_package to accept this)"
            )));
        }
        NamespacePath::root()
    } else {
        NamespacePath::from_package(package)
    };
    let module_path = naming::python_module_path(schema_stem);

    let mut descriptors = Vec::new();
    for message in schema.messages() {
        descriptors.push(BindingDescriptor::message(
            naming::cpp_name(message.fqname()),
            entity_host_name(message, package)?,
            namespace.clone(),
            module_path.clone(),
        ));
    }
    for entity in schema.enums() {
        descriptors.push(describe(EntityKind::Enum, entity, package, &namespace)?);
    }
    if options.generate_service_info {
        for entity in schema.services() {
            descriptors.push(describe(EntityKind::Service, entity, package, &namespace)?);
        }
    }

    tracing::debug!(
        package,
        count = descriptors.len(),
        "built binding descriptors"
    );
    Ok(descriptors)
}

fn describe(
    kind: EntityKind,
    entity: &SchemaEntity,
    package: &str,
    namespace: &NamespacePath,
) -> GenerateResult<BindingDescriptor> {
    Ok(BindingDescriptor::new(
        kind,
        naming::cpp_name(entity.fqname()),
        entity_host_name(entity, package)?,
        namespace.clone(),
    ))
}

fn entity_host_name<'a>(entity: &'a SchemaEntity, package: &str) -> GenerateResult<&'a str> {
    naming::host_name(entity.fqname(), package).ok_or_else(|| {
        GenerateError::SchemaParse(format!(
            "entity {} is not declared inside package {package}",
            entity.fqname()
        ))
    })
}
