use kube::api::ApiResource;
use kube::discovery::Scope;
use kube::{Client, Discovery};
use std::collections::HashMap;

use crate::core::{APPS_GROUP, BATCH_GROUP, DEPLOYMENT, GroupKind, JOB, POD, REPLICA_SET, SERVICE, STATEFUL_SET};
use crate::error::ObserveError;

#[cfg(test)]
#[path = "./mapper.tests.rs"]
mod mapper_tests;

/// Result of resolving a [`GroupKind`] to a concrete API resource.
#[derive(Clone, Debug)]
pub struct RestMapping {
    pub resource: ApiResource,
    pub scope: Scope,
}

impl RestMapping {
    /// Creates new [`RestMapping`] instance.
    pub fn new(resource: ApiResource, scope: Scope) -> Self {
        Self { resource, scope }
    }

    /// Returns the [`GroupKind`] of the mapped resource.
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(self.resource.group.clone(), self.resource.kind.clone())
    }
}

/// Resolves [`GroupKind`]s to [`RestMapping`]s.
pub trait Mapper: Send + Sync {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping, ObserveError>;
}

/// Mapper that resolves kinds from the API discovery data.
pub struct DiscoveryMapper {
    discovery: Discovery,
}

impl DiscoveryMapper {
    /// Creates new [`DiscoveryMapper`] instance from an already run [`Discovery`].
    pub fn new(discovery: Discovery) -> Self {
        Self { discovery }
    }

    /// Runs a fresh API discovery for `client` and creates new [`DiscoveryMapper`] instance from it.
    pub async fn from_client(client: Client) -> Result<Self, ObserveError> {
        let discovery = Discovery::new(client).run().await?;
        Ok(Self::new(discovery))
    }
}

impl Mapper for DiscoveryMapper {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping, ObserveError> {
        self.discovery
            .groups()
            .filter(|group| group.name() == group_kind.group)
            .flat_map(kube::discovery::ApiGroup::recommended_resources)
            .find(|(ar, _)| ar.kind == group_kind.kind)
            .map(|(ar, caps)| RestMapping::new(ar, caps.scope))
            .ok_or_else(|| ObserveError::NoMapping {
                group_kind: group_kind.clone(),
            })
    }
}

/// Mapper with a fixed set of mappings, pre-seeded with the built-in kinds the engine observes.\
/// **Note** that it can be extended with [`insert`](StaticMapper::insert) for custom kinds.
pub struct StaticMapper {
    mappings: HashMap<GroupKind, RestMapping>,
}

impl Default for StaticMapper {
    fn default() -> Self {
        let mut mapper = Self {
            mappings: HashMap::new(),
        };

        mapper.insert(APPS_GROUP, "v1", DEPLOYMENT, "deployments", Scope::Namespaced);
        mapper.insert(APPS_GROUP, "v1", REPLICA_SET, "replicasets", Scope::Namespaced);
        mapper.insert(APPS_GROUP, "v1", STATEFUL_SET, "statefulsets", Scope::Namespaced);
        mapper.insert(BATCH_GROUP, "v1", JOB, "jobs", Scope::Namespaced);
        mapper.insert("", "v1", POD, "pods", Scope::Namespaced);
        mapper.insert("", "v1", SERVICE, "services", Scope::Namespaced);
        mapper.insert("", "v1", "ConfigMap", "configmaps", Scope::Namespaced);
        mapper.insert("", "v1", "Namespace", "namespaces", Scope::Cluster);
        mapper.insert("", "v1", "Node", "nodes", Scope::Cluster);

        mapper
    }
}

impl StaticMapper {
    /// Creates new [`StaticMapper`] instance with the built-in kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping for the provided kind.
    pub fn insert(&mut self, group: &str, version: &str, kind: &str, plural: &str, scope: Scope) {
        let api_version = if group.is_empty() {
            version.to_owned()
        } else {
            format!("{group}/{version}")
        };
        let resource = ApiResource {
            group: group.to_owned(),
            version: version.to_owned(),
            api_version,
            kind: kind.to_owned(),
            plural: plural.to_owned(),
        };
        self.mappings
            .insert(GroupKind::new(group, kind), RestMapping::new(resource, scope));
    }
}

impl Mapper for StaticMapper {
    fn rest_mapping(&self, group_kind: &GroupKind) -> Result<RestMapping, ObserveError> {
        self.mappings
            .get(group_kind)
            .cloned()
            .ok_or_else(|| ObserveError::NoMapping {
                group_kind: group_kind.clone(),
            })
    }
}
