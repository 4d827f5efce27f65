use async_trait::async_trait;
use kube::api::DynamicObject;
use kube::core::Selector;
use kube::core::SelectorExt;
use kube::discovery::Scope;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::core::{APPS_GROUP, DEFAULT_NAMESPACE, DEPLOYMENT, GroupKind, POD, REPLICA_SET, ResourceIdentifier, STATEFUL_SET};
use crate::error::ObserveError;
use crate::mapper::{Mapper, RestMapping};

use super::ObserverReader;

#[cfg(test)]
#[path = "./cached.tests.rs"]
mod cached_tests;

/// Single `(group kind, namespace)` pair that the cache refreshes on every sync.
#[derive(Debug)]
struct SyncTarget {
    group_kind: GroupKind,
    namespace: String,
    mapping: RestMapping,
}

/// Reader that answers all reads from a cache refreshed with one list call per sync target.\
/// **Note** that this binds an owner and its generated resources to a single snapshot,
/// so reads within one poll cycle cannot observe cross-tick skew.
pub struct CachedReader {
    reader: Arc<dyn ObserverReader>,
    targets: Vec<SyncTarget>,
    cache: RwLock<HashMap<(GroupKind, String), Vec<DynamicObject>>>,
}

impl std::fmt::Debug for CachedReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedReader").field("targets", &self.targets).finish_non_exhaustive()
    }
}

impl CachedReader {
    /// Creates new [`CachedReader`] instance for the provided identifiers.\
    /// Kinds that generate other resources are expanded, so lists for the generated kinds
    /// become part of the refreshed snapshot as well.
    pub fn new(
        reader: Arc<dyn ObserverReader>,
        mapper: &dyn Mapper,
        identifiers: &[ResourceIdentifier],
    ) -> Result<Self, ObserveError> {
        let mut targets = Vec::new();
        let mut seen = HashSet::new();
        for identifier in identifiers {
            add_sync_targets(mapper, &identifier.group_kind, &identifier.namespace, &mut targets, &mut seen)?;
        }

        Ok(Self {
            reader,
            targets,
            cache: RwLock::new(HashMap::new()),
        })
    }

    fn read_cached(
        &self,
        group_kind: GroupKind,
        namespace: &str,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        let cache = self.cache.read().expect("cache lock poisoned");
        let Some(items) = cache.get(&(group_kind.clone(), namespace.to_owned())) else {
            return Err(ObserveError::NotCached {
                group_kind,
                namespace: namespace.to_owned(),
            });
        };

        Ok(items.iter().filter(|o| matches_selector(o, selector)).cloned().collect())
    }
}

#[async_trait]
impl ObserverReader for CachedReader {
    async fn get(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, ObserveError> {
        let namespace = normalized_namespace(namespace, &mapping.scope);
        let cache = self.cache.read().expect("cache lock poisoned");
        let Some(items) = cache.get(&(mapping.group_kind(), namespace.clone())) else {
            return Err(ObserveError::NotCached {
                group_kind: mapping.group_kind(),
                namespace,
            });
        };

        Ok(items.iter().find(|o| o.metadata.name.as_deref() == Some(name)).cloned())
    }

    async fn list_namespaced(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        let namespace = normalized_namespace(namespace, &mapping.scope);
        self.read_cached(mapping.group_kind(), &namespace, selector)
    }

    async fn list_cluster_scoped(
        &self,
        mapping: &RestMapping,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        self.read_cached(mapping.group_kind(), "", selector)
    }

    /// Replaces the whole snapshot with freshly listed resources.\
    /// **Note** that on any list failure the previous snapshot stays untouched.
    async fn sync(&self) -> Result<(), ObserveError> {
        let mut snapshot = HashMap::new();
        for target in &self.targets {
            let items = if target.mapping.scope == Scope::Cluster {
                self.reader.list_cluster_scoped(&target.mapping, None).await?
            } else {
                self.reader.list_namespaced(&target.mapping, &target.namespace, None).await?
            };
            snapshot.insert((target.group_kind.clone(), target.namespace.clone()), items);
        }

        tracing::debug!("Refreshed cache snapshot for {} sync targets", self.targets.len());
        *self.cache.write().expect("cache lock poisoned") = snapshot;
        Ok(())
    }
}

/// Static graph of kinds that generate other kinds.
fn generated_kinds(group_kind: &GroupKind) -> Vec<GroupKind> {
    match (group_kind.group.as_str(), group_kind.kind.as_str()) {
        (APPS_GROUP, DEPLOYMENT) => vec![GroupKind::new(APPS_GROUP, REPLICA_SET)],
        (APPS_GROUP, REPLICA_SET | STATEFUL_SET) => vec![GroupKind::core(POD)],
        _ => Vec::new(),
    }
}

fn add_sync_targets(
    mapper: &dyn Mapper,
    group_kind: &GroupKind,
    namespace: &str,
    targets: &mut Vec<SyncTarget>,
    seen: &mut HashSet<(GroupKind, String)>,
) -> Result<(), ObserveError> {
    let mapping = mapper.rest_mapping(group_kind)?;
    let target_namespace = normalized_namespace(namespace, &mapping.scope);
    if seen.insert((group_kind.clone(), target_namespace.clone())) {
        targets.push(SyncTarget {
            group_kind: group_kind.clone(),
            namespace: target_namespace,
            mapping,
        });
    }

    for generated in generated_kinds(group_kind) {
        add_sync_targets(mapper, &generated, namespace, targets, seen)?;
    }

    Ok(())
}

fn normalized_namespace(namespace: &str, scope: &Scope) -> String {
    match scope {
        Scope::Cluster => String::new(),
        Scope::Namespaced => {
            if namespace.is_empty() {
                DEFAULT_NAMESPACE.to_owned()
            } else {
                namespace.to_owned()
            }
        },
    }
}

fn matches_selector(object: &DynamicObject, selector: Option<&Selector>) -> bool {
    let Some(selector) = selector else {
        return true;
    };

    match &object.metadata.labels {
        Some(labels) => selector.matches(labels),
        None => selector.matches(&BTreeMap::new()),
    }
}
