use async_trait::async_trait;
use kube::api::{Api, DynamicObject, ListParams};
use kube::core::Selector;
use kube::discovery::Scope;
use kube::Client;

use crate::error::ObserveError;
use crate::mapper::RestMapping;

use super::ObserverReader;

/// Reader that passes every call straight to the Kubernetes API.
pub struct ApiReader {
    client: Client,
}

impl ApiReader {
    /// Creates new [`ApiReader`] instance.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns [`Api`] object for the mapped resource.
    fn api(&self, mapping: &RestMapping, namespace: Option<&str>) -> Api<DynamicObject> {
        if mapping.scope == Scope::Cluster {
            Api::all_with(self.client.clone(), &mapping.resource)
        } else if let Some(namespace) = namespace {
            Api::namespaced_with(self.client.clone(), namespace, &mapping.resource)
        } else {
            Api::default_namespaced_with(self.client.clone(), &mapping.resource)
        }
    }
}

#[async_trait]
impl ObserverReader for ApiReader {
    async fn get(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, ObserveError> {
        Ok(self.api(mapping, Some(namespace)).get_opt(name).await?)
    }

    async fn list_namespaced(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        list(self.api(mapping, Some(namespace)), selector).await
    }

    async fn list_cluster_scoped(
        &self,
        mapping: &RestMapping,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        list(Api::all_with(self.client.clone(), &mapping.resource), selector).await
    }

    async fn sync(&self) -> Result<(), ObserveError> {
        Ok(())
    }
}

async fn list(api: Api<DynamicObject>, selector: Option<&Selector>) -> Result<Vec<DynamicObject>, ObserveError> {
    let mut params = ListParams::default();
    if let Some(selector) = selector {
        params = params.labels(&selector.to_string());
    }

    Ok(api.list(&params).await?.items)
}
