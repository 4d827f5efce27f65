use async_trait::async_trait;
use kube::api::DynamicObject;
use std::sync::Arc;

use crate::core::{GroupKind, ObservedResource, POD, ResourceIdentifier};

use super::{ObserverContext, ResourceObserver, lookup, observe_owner};

#[cfg(test)]
#[path = "./job.tests.rs"]
mod job_tests;

/// Observer for `Job` resources that inspects generated pods.
pub struct JobObserver {
    context: ObserverContext,
    pods: Arc<dyn ResourceObserver>,
}

impl JobObserver {
    /// Creates new [`JobObserver`] instance.
    pub fn new(context: ObserverContext, pods: Arc<dyn ResourceObserver>) -> Self {
        Self { context, pods }
    }
}

#[async_trait]
impl ResourceObserver for JobObserver {
    async fn observe(&self, identifier: &ResourceIdentifier) -> ObservedResource {
        match lookup(&self.context, identifier).await {
            Ok(object) => self.observe_object(object).await,
            Err(observed) => *observed,
        }
    }

    async fn observe_object(&self, object: DynamicObject) -> ObservedResource {
        observe_owner(&self.context, object, &GroupKind::core(POD), self.pods.as_ref()).await
    }
}
