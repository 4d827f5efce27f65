use async_trait::async_trait;
use kube::api::DynamicObject;
use std::sync::Arc;

use crate::core::{APPS_GROUP, GroupKind, ObservedResource, REPLICA_SET, ResourceIdentifier};

use super::{ObserverContext, ResourceObserver, lookup, observe_owner};

#[cfg(test)]
#[path = "./deployment.tests.rs"]
mod deployment_tests;

/// Observer for `Deployment` resources that inspects generated replica sets.
pub struct DeploymentObserver {
    context: ObserverContext,
    replica_sets: Arc<dyn ResourceObserver>,
}

impl DeploymentObserver {
    /// Creates new [`DeploymentObserver`] instance.
    pub fn new(context: ObserverContext, replica_sets: Arc<dyn ResourceObserver>) -> Self {
        Self { context, replica_sets }
    }
}

#[async_trait]
impl ResourceObserver for DeploymentObserver {
    async fn observe(&self, identifier: &ResourceIdentifier) -> ObservedResource {
        match lookup(&self.context, identifier).await {
            Ok(object) => self.observe_object(object).await,
            Err(observed) => *observed,
        }
    }

    async fn observe_object(&self, object: DynamicObject) -> ObservedResource {
        observe_owner(
            &self.context,
            object,
            &GroupKind::new(APPS_GROUP, REPLICA_SET),
            self.replica_sets.as_ref(),
        )
        .await
    }
}
