use super::*;
use crate::compute::DefaultStatusComputer;
use crate::core::{DEPLOYMENT, ResourceStatus};
use crate::mapper::StaticMapper;
use crate::observers::create_observers;
use crate::testing::{FakeReader, object_with};
use k8s_openapi::serde_json::json;

fn context(reader: FakeReader) -> ObserverContext {
    ObserverContext {
        reader: Arc::new(reader),
        mapper: Arc::new(StaticMapper::new()),
        computer: Arc::new(DefaultStatusComputer),
    }
}

fn deployment_observer(context: &ObserverContext) -> Arc<dyn ResourceObserver> {
    let (observers, _) = create_observers(context);
    Arc::clone(&observers[&GroupKind::new(APPS_GROUP, DEPLOYMENT)])
}

fn deployment_id() -> ResourceIdentifier {
    ResourceIdentifier::new(GroupKind::new(APPS_GROUP, DEPLOYMENT), "bar", "foo")
}

#[tokio::test]
async fn observes_the_whole_generated_tree_test() {
    let reader = FakeReader::new(vec![
        object_with(
            "apps/v1",
            "Deployment",
            "bar",
            "foo",
            None,
            json!({
                "spec": { "replicas": 2, "selector": { "matchLabels": { "app": "web" } } },
                "status": { "readyReplicas": 2 },
            }),
        ),
        object_with(
            "apps/v1",
            "ReplicaSet",
            "bar",
            "foo-b",
            Some(json!({ "app": "web", "rs": "foo-b" })),
            json!({ "spec": { "selector": { "matchLabels": { "rs": "foo-b" } } } }),
        ),
        object_with(
            "apps/v1",
            "ReplicaSet",
            "bar",
            "foo-a",
            Some(json!({ "app": "web", "rs": "foo-a" })),
            json!({ "spec": { "selector": { "matchLabels": { "rs": "foo-a" } } } }),
        ),
        object_with(
            "v1",
            "Pod",
            "bar",
            "foo-a-2",
            Some(json!({ "rs": "foo-a" })),
            json!({ "status": { "phase": "Running", "conditions": [{ "type": "Ready", "status": "True" }] } }),
        ),
        object_with(
            "v1",
            "Pod",
            "bar",
            "foo-a-1",
            Some(json!({ "rs": "foo-a" })),
            json!({ "status": { "phase": "Running", "conditions": [{ "type": "Ready", "status": "True" }] } }),
        ),
    ]);
    let context = context(reader);

    let observed = deployment_observer(&context).observe(&deployment_id()).await;

    assert_eq!(ResourceStatus::Current, observed.status);
    assert_eq!(Some("Ready: 2/2"), observed.message.as_deref());
    assert!(observed.resource.is_some());

    let names = observed.generated.iter().map(|o| o.identifier.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["foo-a", "foo-b"], names);

    let pods = &observed.generated[0].generated;
    let names = pods.iter().map(|o| o.identifier.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["foo-a-1", "foo-a-2"], names);
    assert_eq!(ResourceStatus::Current, pods[0].status);
    assert!(observed.generated[1].generated.is_empty());
}

#[tokio::test]
async fn missing_deployment_is_not_found_test() {
    let context = context(FakeReader::new(Vec::new()));

    let observed = deployment_observer(&context).observe(&deployment_id()).await;

    assert_eq!(ResourceStatus::NotFound, observed.status);
    assert_eq!(Some("Resource doesn't exist"), observed.message.as_deref());
    assert!(observed.resource.is_none());
}

#[tokio::test]
async fn missing_selector_is_unknown_test() {
    let reader = FakeReader::new(vec![object_with("apps/v1", "Deployment", "bar", "foo", None, json!({}))]);
    let context = context(reader);

    let observed = deployment_observer(&context).observe(&deployment_id()).await;

    assert_eq!(ResourceStatus::Unknown, observed.status);
    assert_eq!(
        "invalid label selector: no selector found",
        observed.error.as_ref().unwrap().to_string()
    );
    assert!(observed.resource.is_some());
}

#[tokio::test]
async fn read_error_is_unknown_test() {
    let reader = FakeReader::new(Vec::new());
    reader.set_fail_reads(true);
    let context = context(reader);

    let observed = deployment_observer(&context).observe(&deployment_id()).await;

    assert_eq!(ResourceStatus::Unknown, observed.status);
    assert!(observed.error.is_some());
}
