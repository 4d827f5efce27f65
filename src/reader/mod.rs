use async_trait::async_trait;
use kube::api::DynamicObject;
use kube::core::Selector;

use crate::error::ObserveError;
use crate::mapper::RestMapping;

pub use self::api::ApiReader;
pub use self::cached::CachedReader;

mod api;
mod cached;

/// Uniform read access to the cluster: single fetch, namespaced list, cluster list
/// and snapshot refresh.
#[async_trait]
pub trait ObserverReader: Send + Sync {
    /// Fetches a single object, `Ok(None)` means that the object does not exist.
    async fn get(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, ObserveError>;

    /// Lists objects of the mapped kind in `namespace`, optionally narrowed down by `selector`.
    async fn list_namespaced(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError>;

    /// Lists cluster scoped objects of the mapped kind, optionally narrowed down by `selector`.
    async fn list_cluster_scoped(
        &self,
        mapping: &RestMapping,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError>;

    /// Refreshes the internal snapshot, a no-op for readers that do not cache.
    async fn sync(&self) -> Result<(), ObserveError>;
}
