use async_trait::async_trait;
use kube::api::DynamicObject;

use crate::core::{ObservedResource, ResourceIdentifier};

use super::{ObserverContext, ResourceObserver, lookup, observe_leaf};

/// Observer used for any kind without a specialized observer.
pub struct DefaultObserver {
    context: ObserverContext,
}

impl DefaultObserver {
    /// Creates new [`DefaultObserver`] instance.
    pub fn new(context: ObserverContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl ResourceObserver for DefaultObserver {
    async fn observe(&self, identifier: &ResourceIdentifier) -> ObservedResource {
        match lookup(&self.context, identifier).await {
            Ok(object) => self.observe_object(object).await,
            Err(observed) => *observed,
        }
    }

    async fn observe_object(&self, object: DynamicObject) -> ObservedResource {
        observe_leaf(&self.context, object)
    }
}
