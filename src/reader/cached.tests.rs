use super::*;
use crate::mapper::StaticMapper;
use crate::testing::{FakeReader, object};
use k8s_openapi::serde_json::json;

fn deployment_id(namespace: &str, name: &str) -> ResourceIdentifier {
    ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), namespace, name)
}

fn sync_domain(reader: &CachedReader) -> Vec<(String, String)> {
    reader
        .targets
        .iter()
        .map(|t| (t.group_kind.to_string(), t.namespace.clone()))
        .collect()
}

#[test]
fn sync_domain_is_expanded_for_generated_kinds_test() {
    let mapper = StaticMapper::new();
    let inner = Arc::new(FakeReader::new(Vec::new()));
    let identifiers = [deployment_id("foo", "a"), deployment_id("bar", "b")];

    let reader = CachedReader::new(inner, &mapper, &identifiers).unwrap();

    assert_eq!(
        vec![
            ("Deployment.apps".to_owned(), "foo".to_owned()),
            ("ReplicaSet.apps".to_owned(), "foo".to_owned()),
            ("Pod".to_owned(), "foo".to_owned()),
            ("Deployment.apps".to_owned(), "bar".to_owned()),
            ("ReplicaSet.apps".to_owned(), "bar".to_owned()),
            ("Pod".to_owned(), "bar".to_owned()),
        ],
        sync_domain(&reader)
    );
}

#[test]
fn sync_domain_is_deduplicated_test() {
    let mapper = StaticMapper::new();
    let inner = Arc::new(FakeReader::new(Vec::new()));
    let identifiers = [
        deployment_id("foo", "a"),
        deployment_id("foo", "b"),
        ResourceIdentifier::new(GroupKind::core("Pod"), "foo", "c"),
    ];

    let reader = CachedReader::new(inner, &mapper, &identifiers).unwrap();

    assert_eq!(
        vec![
            ("Deployment.apps".to_owned(), "foo".to_owned()),
            ("ReplicaSet.apps".to_owned(), "foo".to_owned()),
            ("Pod".to_owned(), "foo".to_owned()),
        ],
        sync_domain(&reader)
    );
}

#[test]
fn sync_domain_normalizes_namespaces_test() {
    let mapper = StaticMapper::new();
    let inner = Arc::new(FakeReader::new(Vec::new()));
    let identifiers = [
        ResourceIdentifier::new(GroupKind::new("apps", "StatefulSet"), "", "db"),
        ResourceIdentifier::cluster_scoped(GroupKind::core("Namespace"), "foo"),
    ];

    let reader = CachedReader::new(inner, &mapper, &identifiers).unwrap();

    assert_eq!(
        vec![
            ("StatefulSet.apps".to_owned(), "default".to_owned()),
            ("Pod".to_owned(), "default".to_owned()),
            ("Namespace".to_owned(), String::new()),
        ],
        sync_domain(&reader)
    );
}

#[test]
fn unknown_kind_fails_construction_test() {
    let mapper = StaticMapper::new();
    let inner = Arc::new(FakeReader::new(Vec::new()));
    let identifiers = [ResourceIdentifier::new(GroupKind::new("example.com", "Widget"), "foo", "a")];

    let error = CachedReader::new(inner, &mapper, &identifiers).unwrap_err();
    assert_eq!("no mapping found for Widget.example.com", error.to_string());
}

#[tokio::test]
async fn reads_answer_from_the_snapshot_test() {
    let mapper = StaticMapper::new();
    let mapping = mapper.rest_mapping(&GroupKind::new("apps", "Deployment")).unwrap();
    let inner = Arc::new(FakeReader::new(vec![object(
        "apps/v1",
        "Deployment",
        "foo",
        "a",
        None,
    )]));
    let reader = CachedReader::new(Arc::clone(&inner) as Arc<dyn ObserverReader>, &mapper, &[deployment_id("foo", "a")]).unwrap();

    reader.sync().await.unwrap();
    let fetched = reader.get(&mapping, "foo", "a").await.unwrap();
    assert_eq!(Some("a"), fetched.unwrap().metadata.name.as_deref());

    // Not present in the cached list.
    assert!(reader.get(&mapping, "foo", "other").await.unwrap().is_none());

    // Inner reader changes are invisible until the next sync.
    inner.set_objects(Vec::new());
    assert!(reader.get(&mapping, "foo", "a").await.unwrap().is_some());
    reader.sync().await.unwrap();
    assert!(reader.get(&mapping, "foo", "a").await.unwrap().is_none());
}

#[tokio::test]
async fn list_filters_by_labels_test() {
    let mapper = StaticMapper::new();
    let mapping = mapper.rest_mapping(&GroupKind::core("Pod")).unwrap();
    let inner = Arc::new(FakeReader::new(vec![
        object("v1", "Pod", "foo", "a", Some(json!({ "app": "web" }))),
        object("v1", "Pod", "foo", "b", Some(json!({ "app": "db" }))),
        object("v1", "Pod", "foo", "c", None),
    ]));
    let identifiers = [ResourceIdentifier::new(GroupKind::core("Pod"), "foo", "a")];
    let reader = CachedReader::new(inner, &mapper, &identifiers).unwrap();
    reader.sync().await.unwrap();

    let owner = crate::testing::object_with(
        "apps/v1",
        "Deployment",
        "foo",
        "owner",
        None,
        json!({ "spec": { "selector": { "matchLabels": { "app": "web" } } } }),
    );
    let selector = crate::observers::to_selector(&owner).unwrap();

    let items = reader.list_namespaced(&mapping, "foo", Some(&selector)).await.unwrap();
    assert_eq!(1, items.len());
    assert_eq!(Some("a"), items[0].metadata.name.as_deref());

    let items = reader.list_namespaced(&mapping, "foo", None).await.unwrap();
    assert_eq!(3, items.len());
}

#[tokio::test]
async fn read_outside_the_sync_domain_fails_test() {
    let mapper = StaticMapper::new();
    let mapping = mapper.rest_mapping(&GroupKind::core("Service")).unwrap();
    let inner = Arc::new(FakeReader::new(Vec::new()));
    let reader = CachedReader::new(inner, &mapper, &[deployment_id("foo", "a")]).unwrap();
    reader.sync().await.unwrap();

    let error = reader.list_namespaced(&mapping, "foo", None).await.unwrap_err();
    assert_eq!(
        "Service in namespace 'foo' is not part of the cache sync domain",
        error.to_string()
    );
}

#[tokio::test]
async fn failed_sync_keeps_the_previous_snapshot_test() {
    let mapper = StaticMapper::new();
    let mapping = mapper.rest_mapping(&GroupKind::new("apps", "Deployment")).unwrap();
    let inner = Arc::new(FakeReader::new(vec![object(
        "apps/v1",
        "Deployment",
        "foo",
        "a",
        None,
    )]));
    let reader = CachedReader::new(Arc::clone(&inner) as Arc<dyn ObserverReader>, &mapper, &[deployment_id("foo", "a")]).unwrap();
    reader.sync().await.unwrap();

    inner.set_fail_sync(true);
    assert!(reader.sync().await.is_err());
    assert!(reader.get(&mapping, "foo", "a").await.unwrap().is_some());
}
