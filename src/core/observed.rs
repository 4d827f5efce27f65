use kube::api::DynamicObject;
use std::sync::Arc;

use crate::error::ObserveError;

use super::{ResourceIdentifier, ResourceStatus};

#[cfg(test)]
#[path = "./observed.tests.rs"]
mod observed_tests;

/// Single observation of a k8s resource, together with observations of all resources it generated.
#[derive(Debug, Clone)]
pub struct ObservedResource {
    pub identifier: ResourceIdentifier,
    pub status: ResourceStatus,
    pub resource: Option<DynamicObject>,
    pub error: Option<Arc<ObserveError>>,
    pub message: Option<String>,
    pub generated: Vec<ObservedResource>,
}

impl ObservedResource {
    /// Creates new [`ObservedResource`] instance.
    pub fn new(identifier: ResourceIdentifier, status: ResourceStatus) -> Self {
        Self {
            identifier,
            status,
            resource: None,
            error: None,
            message: None,
            generated: Vec::new(),
        }
    }

    /// Creates new [`ObservedResource`] instance for a resource that does not exist in the cluster.
    pub fn not_found(identifier: ResourceIdentifier) -> Self {
        let mut observed = Self::new(identifier, ResourceStatus::NotFound);
        observed.message = Some("Resource doesn't exist".to_owned());
        observed
    }

    /// Creates new [`ObservedResource`] instance for a resource whose status cannot be determined.
    pub fn errored(identifier: ResourceIdentifier, error: ObserveError) -> Self {
        let mut observed = Self::new(identifier, ResourceStatus::Unknown);
        observed.error = Some(Arc::new(error));
        observed
    }

    /// Attaches the raw resource to this observation.
    pub fn with_resource(mut self, resource: DynamicObject) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Attaches observations of generated resources to this observation.
    pub fn with_generated(mut self, generated: Vec<ObservedResource>) -> Self {
        self.generated = generated;
        self
    }
}

/// Equality over observations drives event emission, so it deliberately skips the raw
/// [`resource`](ObservedResource::resource) payload: churn in status irrelevant fields must not
/// produce updates. Errors compare by their rendered message.
impl PartialEq for ObservedResource {
    fn eq(&self, other: &Self) -> bool {
        if self.identifier != other.identifier || self.status != other.status || self.message != other.message {
            return false;
        }

        let errors_equal = match (&self.error, &other.error) {
            (None, None) => true,
            (Some(left), Some(right)) => left.to_string() == right.to_string(),
            _ => false,
        };

        errors_equal && self.generated == other.generated
    }
}

impl Eq for ObservedResource {}
