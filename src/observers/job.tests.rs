use super::*;
use crate::compute::DefaultStatusComputer;
use crate::core::{BATCH_GROUP, JOB, ResourceStatus};
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

#[tokio::test]
async fn observes_generated_pods_test() {
    let reader = FakeReader::new(vec![
        object_with(
            "batch/v1",
            "Job",
            "default",
            "import",
            None,
            json!({ "spec": { "selector": { "matchLabels": { "job-name": "import" } } } }),
        ),
        object_with(
            "v1",
            "Pod",
            "default",
            "import-x",
            Some(json!({ "job-name": "import" })),
            json!({ "status": { "phase": "Succeeded" } }),
        ),
        object_with(
            "v1",
            "Pod",
            "default",
            "import-a",
            Some(json!({ "job-name": "import" })),
            json!({ "status": { "phase": "Failed" } }),
        ),
    ]);
    let context = context(reader);
    let (observers, _) = create_observers(&context);
    let identifier = ResourceIdentifier::new(GroupKind::new(BATCH_GROUP, JOB), "default", "import");

    let observed = observers[&GroupKind::new(BATCH_GROUP, JOB)].observe(&identifier).await;

    assert_eq!(ResourceStatus::Current, observed.status);

    let names = observed.generated.iter().map(|o| o.identifier.name.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["import-a", "import-x"], names);
    assert_eq!(ResourceStatus::Failed, observed.generated[0].status);
    assert_eq!(ResourceStatus::Current, observed.generated[1].status);
}

#[tokio::test]
async fn unknown_kind_uses_the_default_observer_test() {
    let reader = FakeReader::new(vec![object_with("example.com/v1", "Widget", "default", "foo", None, json!({}))]);
    let context = context(reader);
    let (_, default_observer) = create_observers(&context);
    let identifier = ResourceIdentifier::new(GroupKind::new("example.com", "Widget"), "default", "foo");

    let observed = default_observer.observe(&identifier).await;

    assert_eq!(ResourceStatus::Unknown, observed.status);
    assert_eq!(
        "no mapping found for Widget.example.com",
        observed.error.as_ref().unwrap().to_string()
    );
}
