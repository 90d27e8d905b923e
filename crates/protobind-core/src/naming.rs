//! Naming convention utilities for code generation.
//!
//! This module converts between schema names, C++ names and Python names.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `pkg.sub.Type` | [`cpp_name`] | `::pkg::sub::Type` |
//! | `pkg.sub.Type` + `pkg.sub` | [`host_name`] | `Type` |
//! | `pkg.sub` | [`namespace_prefix`] | `::pkg::sub::` |
//! | `pkg/my-file` | [`python_module_path`] | `pkg.my_file_pb2` |
//! | `pkg/a.proto` | [`strip_schema_extension`] | `pkg/a` |
//! | `pkg/a_clif.h` | [`include_guard`] | `PKG_A_CLIF_H_` |

use crate::error::{GenerateError, GenerateResult};

/// Schema file extensions the generator accepts
pub const VALID_EXTENSIONS: &[&str] = &[".proto"];

/// Suffix of modules generated by the Python protobuf compiler
pub const PYTHON_MODULE_SUFFIX: &str = "_pb2";

/// Convert a dotted schema name to a fully-qualified C++ name.
///
/// # Examples
///
/// ```
/// use protobind_core::naming::cpp_name;
///
/// assert_eq!(cpp_name("pkg.sub.Type"), "::pkg::sub::Type");
/// assert_eq!(cpp_name("Type"), "::Type");
/// ```
pub fn cpp_name(fqname: &str) -> String {
    format!("::{}", fqname.replace('.', "::"))
}

/// Name of a schema entity as seen from Python.
///
/// Strips `package.` from `fqname`. Returns `None` when `fqname` is not
/// inside `package`.
///
/// # Examples
///
/// ```
/// use protobind_core::naming::host_name;
///
/// assert_eq!(host_name("pkg.Outer.Inner", "pkg"), Some("Outer.Inner"));
/// assert_eq!(host_name("Foo", ""), Some("Foo"));
/// assert_eq!(host_name("other.Foo", "pkg"), None);
/// ```
pub fn host_name<'a>(fqname: &'a str, package: &str) -> Option<&'a str> {
    if package.is_empty() {
        return Some(fqname);
    }
    fqname
        .strip_prefix(package)?
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty())
}

/// C++ namespace prefix for a dotted package, `::` for the empty package.
///
/// # Examples
///
/// ```
/// use protobind_core::naming::namespace_prefix;
///
/// assert_eq!(namespace_prefix("pkg.sub"), "::pkg::sub::");
/// assert_eq!(namespace_prefix(""), "::");
/// ```
pub fn namespace_prefix(package: &str) -> String {
    if package.is_empty() {
        "::".to_string()
    } else {
        format!("::{}::", package.replace('.', "::"))
    }
}

/// Python module generated for a schema path without its extension.
///
/// Path separators become dots and hyphens become underscores.
///
/// # Examples
///
/// ```
/// use protobind_core::naming::python_module_path;
///
/// assert_eq!(python_module_path("pkg/sub/foo"), "pkg.sub.foo_pb2");
/// assert_eq!(python_module_path("my-pkg/a-b"), "my_pkg.a_b_pb2");
/// ```
pub fn python_module_path(schema_stem: &str) -> String {
    format!(
        "{}{PYTHON_MODULE_SUFFIX}",
        schema_stem.replace('/', ".").replace('-', "_")
    )
}

/// Strip a recognized schema extension from `path`.
pub fn strip_schema_extension(path: &str) -> GenerateResult<&str> {
    VALID_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| GenerateError::UnrecognizedExtension {
            path: path.to_string(),
            expected: format!("{VALID_EXTENSIONS:?}"),
        })
}

/// Include guard macro name for a header path.
///
/// # Examples
///
/// ```
/// use protobind_core::naming::include_guard;
///
/// assert_eq!(include_guard("pkg/a-b_clif.h"), "PKG_A_B_CLIF_H_");
/// ```
pub fn include_guard(header_path: &str) -> String {
    let mut guard: String = header_path
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if guard.starts_with(|c: char| c.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard.push('_');
    guard
}
