//! Namespace grouping of descriptors

use crate::descriptor::{BindingDescriptor, NamespacePath};

/// A contiguous run of descriptors sharing one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceGroup<'a> {
    namespace: &'a NamespacePath,
    members: Vec<&'a BindingDescriptor>,
}

impl<'a> NamespaceGroup<'a> {
    pub fn namespace(&self) -> &'a NamespacePath {
        self.namespace
    }

    pub fn members(&self) -> &[&'a BindingDescriptor] {
        &self.members
    }
}

/// Group adjacent descriptors with equal namespaces, keeping input order.
///
/// Runs that share a namespace but are separated by another namespace stay
/// separate groups.
pub fn group_adjacent<'a, I>(descriptors: I) -> Vec<NamespaceGroup<'a>>
where
    I: IntoIterator<Item = &'a BindingDescriptor>,
{
    let mut groups: Vec<NamespaceGroup<'a>> = Vec::new();
    for descriptor in descriptors {
        match groups.last_mut() {
            Some(group) if group.namespace == descriptor.namespace_path() => {
                group.members.push(descriptor);
            }
            _ => groups.push(NamespaceGroup {
                namespace: descriptor.namespace_path(),
                members: vec![descriptor],
            }),
        }
    }
    groups
}

/// Sort descriptors by C++ name, then group adjacent namespaces
pub fn group_sorted(descriptors: &[BindingDescriptor]) -> Vec<NamespaceGroup<'_>> {
    let mut sorted: Vec<&BindingDescriptor> = descriptors.iter().collect();
    sorted.sort_by(|a, b| a.target_name().cmp(b.target_name()));
    group_adjacent(sorted)
}
