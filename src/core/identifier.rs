use std::cmp::Ordering;
use std::fmt::Display;

use super::DEFAULT_NAMESPACE;

#[cfg(test)]
#[path = "./identifier.tests.rs"]
mod identifier_tests;

/// Represents kubernetes kind together with its API group.\
/// **Note** that the core API group is represented by an empty string.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    /// Creates new [`GroupKind`] instance.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Creates new [`GroupKind`] instance for a kind from the core API group.
    pub fn core(kind: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            kind: kind.into(),
        }
    }
}

impl Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Points to the specific resource in a k8s cluster.\
/// **Note** that an empty namespace denotes a cluster scoped resource.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    pub group_kind: GroupKind,
    pub namespace: String,
    pub name: String,
}

impl ResourceIdentifier {
    /// Creates new [`ResourceIdentifier`] instance.
    pub fn new(group_kind: GroupKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group_kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Creates new [`ResourceIdentifier`] instance for a cluster scoped resource.
    pub fn cluster_scoped(group_kind: GroupKind, name: impl Into<String>) -> Self {
        Self {
            group_kind,
            namespace: String::new(),
            name: name.into(),
        }
    }

    /// Returns the namespace that should be used for single object lookups.\
    /// **Note** that an unset namespace falls back to the `default` one.
    pub fn lookup_namespace(&self) -> &str {
        if self.namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            &self.namespace
        }
    }
}

impl Ord for ResourceIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.group_kind.group.cmp(&other.group_kind.group))
            .then_with(|| self.group_kind.kind.cmp(&other.group_kind.kind))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for ResourceIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{} {}", self.group_kind, self.name)
        } else {
            write!(f, "{} {}/{}", self.group_kind, self.namespace, self.name)
        }
    }
}
