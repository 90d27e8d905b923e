//! Source-root stripping for schema paths

/// Strip the first matching source root from `path`.
///
/// Roots are compared as whole path components, so `src` strips `src/a.proto`
/// but not `srcs/a.proto`. Empty roots are ignored and trailing slashes on a
/// root are tolerated. When no root matches, the path is returned unchanged.
///
/// # Examples
///
/// ```
/// use protobind_schema::strip_source_roots;
///
/// assert_eq!(strip_source_roots("root/pkg/a.proto", &["root"]), "pkg/a.proto");
/// assert_eq!(strip_source_roots("pkg/a.proto", &["other"]), "pkg/a.proto");
/// ```
pub fn strip_source_roots(path: &str, roots: &[&str]) -> String {
    for root in roots {
        let root = root.trim_end_matches('/');
        if root.is_empty() {
            continue;
        }
        if let Some(rest) = path.strip_prefix(root) {
            if let Some(relative) = rest.strip_prefix('/') {
                return relative.to_string();
            }
        }
    }
    path.to_string()
}
