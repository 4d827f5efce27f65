use async_trait::async_trait;
use k8s_openapi::serde_json::{Value, from_value, json};
use kube::api::DynamicObject;
use kube::core::Selector;
use kube::core::SelectorExt;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ObserveError;
use crate::mapper::RestMapping;
use crate::reader::ObserverReader;

/// Builds [`DynamicObject`] from raw JSON.
pub fn object_from(value: Value) -> DynamicObject {
    from_value(value).expect("valid dynamic object JSON")
}

/// Builds [`DynamicObject`] with the provided metadata only.
pub fn object(api_version: &str, kind: &str, namespace: &str, name: &str, labels: Option<Value>) -> DynamicObject {
    object_with(api_version, kind, namespace, name, labels, json!({}))
}

/// Builds [`DynamicObject`] with the provided metadata and additional top level fields
/// (e.g. `spec` and `status`) taken from `body`.
pub fn object_with(
    api_version: &str,
    kind: &str,
    namespace: &str,
    name: &str,
    labels: Option<Value>,
    body: Value,
) -> DynamicObject {
    let mut metadata = json!({ "name": name });
    if !namespace.is_empty() {
        metadata["namespace"] = json!(namespace);
    }
    if let Some(labels) = labels {
        metadata["labels"] = labels;
    }

    let mut value = json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": metadata,
    });
    if let Some(extra) = body.as_object() {
        for (key, field) in extra {
            value[key] = field.clone();
        }
    }

    object_from(value)
}

/// In-memory [`ObserverReader`] over a fixed set of objects.
pub struct FakeReader {
    objects: Mutex<Vec<DynamicObject>>,
    fail_sync: AtomicBool,
    fail_reads: AtomicBool,
}

impl FakeReader {
    pub fn new(objects: Vec<DynamicObject>) -> Self {
        Self {
            objects: Mutex::new(objects),
            fail_sync: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_objects(&self, objects: Vec<DynamicObject>) {
        *self.objects.lock().unwrap() = objects;
    }

    pub fn set_fail_sync(&self, fail: bool) {
        self.fail_sync.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    fn matching(&self, mapping: &RestMapping, namespace: Option<&str>, selector: Option<&Selector>) -> Vec<DynamicObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| {
                o.types.as_ref().is_some_and(|t| {
                    t.kind == mapping.resource.kind && t.api_version == mapping.resource.api_version
                })
            })
            .filter(|o| namespace.is_none_or(|ns| o.metadata.namespace.as_deref().unwrap_or("") == ns))
            .filter(|o| match selector {
                Some(selector) => match &o.metadata.labels {
                    Some(labels) => selector.matches(labels),
                    None => selector.matches(&BTreeMap::new()),
                },
                None => true,
            })
            .cloned()
            .collect()
    }

    fn read_error(&self) -> Option<ObserveError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            Some(ObserveError::Compute {
                message: "fake read failure".to_owned(),
            })
        } else {
            None
        }
    }
}

#[async_trait]
impl ObserverReader for FakeReader {
    async fn get(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, ObserveError> {
        if let Some(error) = self.read_error() {
            return Err(error);
        }

        Ok(self
            .matching(mapping, Some(namespace), None)
            .into_iter()
            .find(|o| o.metadata.name.as_deref() == Some(name)))
    }

    async fn list_namespaced(
        &self,
        mapping: &RestMapping,
        namespace: &str,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        if let Some(error) = self.read_error() {
            return Err(error);
        }

        Ok(self.matching(mapping, Some(namespace), selector))
    }

    async fn list_cluster_scoped(
        &self,
        mapping: &RestMapping,
        selector: Option<&Selector>,
    ) -> Result<Vec<DynamicObject>, ObserveError> {
        if let Some(error) = self.read_error() {
            return Err(error);
        }

        Ok(self.matching(mapping, None, selector))
    }

    async fn sync(&self) -> Result<(), ObserveError> {
        if self.fail_sync.load(Ordering::Relaxed) {
            Err(ObserveError::Compute {
                message: "fake sync failure".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}
