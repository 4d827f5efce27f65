use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::serde_json::from_value;
use kube::api::DynamicObject;
use kube::core::Selector;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compute::StatusComputer;
use crate::core::{
    APPS_GROUP, BATCH_GROUP, DEFAULT_NAMESPACE, DEPLOYMENT, GroupKind, JOB, ObservedResource, POD, REPLICA_SET,
    ResourceIdentifier, SERVICE, STATEFUL_SET,
};
use crate::error::ObserveError;
use crate::mapper::Mapper;
use crate::reader::ObserverReader;

pub use self::default::DefaultObserver;
pub use self::deployment::DeploymentObserver;
pub use self::job::JobObserver;
pub use self::pod::PodObserver;
pub use self::replica_set::ReplicaSetObserver;
pub use self::service::ServiceObserver;
pub use self::stateful_set::StatefulSetObserver;

mod default;
mod deployment;
mod job;
mod pod;
mod replica_set;
mod service;
mod stateful_set;

/// Shared dependencies of all per-kind observers.
#[derive(Clone)]
pub struct ObserverContext {
    pub reader: Arc<dyn ObserverReader>,
    pub mapper: Arc<dyn Mapper>,
    pub computer: Arc<dyn StatusComputer>,
}

/// Maps an identifier or an already fetched object to an [`ObservedResource`].
#[async_trait]
pub trait ResourceObserver: Send + Sync {
    /// Fetches the object pointed to by `identifier` and observes it.
    async fn observe(&self, identifier: &ResourceIdentifier) -> ObservedResource;

    /// Observes an already fetched object without an additional lookup.\
    /// **Note** that observers of generated resources are always called this way,
    /// so the whole tree is built from a single snapshot.
    async fn observe_object(&self, object: DynamicObject) -> ObservedResource;
}

/// Creates observers for all kinds with specialized observation logic,
/// together with the default observer used for any other kind.
pub(crate) fn create_observers(
    context: &ObserverContext,
) -> (HashMap<GroupKind, Arc<dyn ResourceObserver>>, Arc<dyn ResourceObserver>) {
    let pods: Arc<dyn ResourceObserver> = Arc::new(PodObserver::new(context.clone()));
    let replica_sets: Arc<dyn ResourceObserver> = Arc::new(ReplicaSetObserver::new(context.clone(), Arc::clone(&pods)));
    let deployments: Arc<dyn ResourceObserver> =
        Arc::new(DeploymentObserver::new(context.clone(), Arc::clone(&replica_sets)));
    let stateful_sets: Arc<dyn ResourceObserver> =
        Arc::new(StatefulSetObserver::new(context.clone(), Arc::clone(&pods)));
    let jobs: Arc<dyn ResourceObserver> = Arc::new(JobObserver::new(context.clone(), Arc::clone(&pods)));
    let services: Arc<dyn ResourceObserver> = Arc::new(ServiceObserver::new(context.clone()));

    let mut observers: HashMap<GroupKind, Arc<dyn ResourceObserver>> = HashMap::new();
    observers.insert(GroupKind::new(APPS_GROUP, DEPLOYMENT), deployments);
    observers.insert(GroupKind::new(APPS_GROUP, REPLICA_SET), replica_sets);
    observers.insert(GroupKind::new(APPS_GROUP, STATEFUL_SET), stateful_sets);
    observers.insert(GroupKind::new(BATCH_GROUP, JOB), jobs);
    observers.insert(GroupKind::core(POD), pods);
    observers.insert(GroupKind::core(SERVICE), services);

    (observers, Arc::new(DefaultObserver::new(context.clone())))
}

/// Fetches the object pointed to by `identifier`, returns a ready [`ObservedResource`]
/// when the lookup cannot produce one.
pub(crate) async fn lookup(
    context: &ObserverContext,
    identifier: &ResourceIdentifier,
) -> Result<DynamicObject, Box<ObservedResource>> {
    let mapping = match context.mapper.rest_mapping(&identifier.group_kind) {
        Ok(mapping) => mapping,
        Err(error) => return Err(Box::new(ObservedResource::errored(identifier.clone(), error))),
    };

    match context.reader.get(&mapping, identifier.lookup_namespace(), &identifier.name).await {
        Ok(Some(mut object)) => {
            object.metadata.namespace = if identifier.namespace.is_empty() {
                None
            } else {
                Some(identifier.namespace.clone())
            };
            Ok(object)
        },
        Ok(None) => Err(Box::new(ObservedResource::not_found(identifier.clone()))),
        Err(error) => Err(Box::new(ObservedResource::errored(identifier.clone(), error))),
    }
}

/// Builds [`ResourceIdentifier`] from object's type and object metadata.
pub(crate) fn to_identifier(object: &DynamicObject) -> ResourceIdentifier {
    let group_kind = match &object.types {
        Some(types) => match types.api_version.split_once('/') {
            Some((group, _)) => GroupKind::new(group, types.kind.clone()),
            None => GroupKind::core(types.kind.clone()),
        },
        None => GroupKind::default(),
    };

    ResourceIdentifier::new(
        group_kind,
        object.metadata.namespace.clone().unwrap_or_default(),
        object.metadata.name.clone().unwrap_or_default(),
    )
}

/// Compiles the label selector found at object's `spec.selector` path.
pub(crate) fn to_selector(object: &DynamicObject) -> Result<Selector, ObserveError> {
    let selector = &object.data["spec"]["selector"];
    if selector.is_null() {
        return Err(ObserveError::Selector {
            message: "no selector found".to_owned(),
        });
    }

    let selector: LabelSelector = from_value(selector.clone()).map_err(|error| ObserveError::Selector {
        message: error.to_string(),
    })?;
    Selector::try_from(selector).map_err(|error| ObserveError::Selector {
        message: error.to_string(),
    })
}

/// Observes an object that does not generate any other resources.
pub(crate) fn observe_leaf(context: &ObserverContext, object: DynamicObject) -> ObservedResource {
    let identifier = to_identifier(&object);

    match context.computer.compute(&object) {
        Ok(result) => {
            let mut observed = ObservedResource::new(identifier, result.status).with_resource(object);
            observed.message = Some(result.message);
            observed
        },
        Err(error) => ObservedResource::errored(identifier, error),
    }
}

/// Observes an object that generates resources of `child_kind`: lists the generated
/// resources with the owner's label selector, observes each of them from the same
/// snapshot and attaches the sorted observations to the owner.
pub(crate) async fn observe_owner(
    context: &ObserverContext,
    object: DynamicObject,
    child_kind: &GroupKind,
    child_observer: &dyn ResourceObserver,
) -> ObservedResource {
    let identifier = to_identifier(&object);

    let selector = match to_selector(&object) {
        Ok(selector) => selector,
        Err(error) => return ObservedResource::errored(identifier, error).with_resource(object),
    };

    let mapping = match context.mapper.rest_mapping(child_kind) {
        Ok(mapping) => mapping,
        Err(error) => return ObservedResource::errored(identifier, error).with_resource(object),
    };

    let namespace = match object.metadata.namespace.as_deref() {
        Some(namespace) if !namespace.is_empty() => namespace.to_owned(),
        _ => DEFAULT_NAMESPACE.to_owned(),
    };

    let children = match context.reader.list_namespaced(&mapping, &namespace, Some(&selector)).await {
        Ok(children) => children,
        Err(error) => return ObservedResource::errored(identifier, error).with_resource(object),
    };

    let mut generated = Vec::with_capacity(children.len());
    for child in children {
        generated.push(child_observer.observe_object(child).await);
    }
    generated.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    match context.computer.compute(&object) {
        Ok(result) => {
            let mut observed = ObservedResource::new(identifier, result.status)
                .with_resource(object)
                .with_generated(generated);
            observed.message = Some(result.message);
            observed
        },
        Err(error) => ObservedResource::errored(identifier, error).with_generated(generated),
    }
}
