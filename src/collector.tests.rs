use super::*;
use crate::core::GroupKind;
use tokio::sync::mpsc;

fn identifiers() -> Vec<ResourceIdentifier> {
    vec![
        ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "default", "foo"),
        ResourceIdentifier::new(GroupKind::core("Service"), "default", "bar"),
    ]
}

fn updated(identifier: &ResourceIdentifier, status: ResourceStatus, aggregate_status: ResourceStatus) -> Event {
    Event::ResourceUpdated {
        aggregate_status,
        resource: Box::new(ObservedResource::new(identifier.clone(), status)),
    }
}

#[tokio::test]
async fn initial_snapshot_covers_all_identifiers_test() {
    let collector = StatusCollector::new(Handle::current(), &identifiers());
    let observation = collector.latest_observation();

    assert_eq!(None, observation.last_event_type);
    assert_eq!(ResourceStatus::Unknown, observation.aggregate_status);
    assert_eq!(2, observation.resources.len());
    assert!(observation.resources.iter().all(|o| o.status == ResourceStatus::Unknown));
}

#[tokio::test]
async fn events_update_the_snapshot_test() {
    let ids = identifiers();
    let collector = StatusCollector::new(Handle::current(), &ids);
    let (events_tx, events_rx) = mpsc::channel(1);
    let worker = collector.observe(events_rx, CancellationToken::new());

    events_tx
        .send(updated(&ids[0], ResourceStatus::InProgress, ResourceStatus::InProgress))
        .await
        .unwrap();
    events_tx
        .send(updated(&ids[0], ResourceStatus::Current, ResourceStatus::Current))
        .await
        .unwrap();
    events_tx
        .send(Event::Completed {
            aggregate_status: ResourceStatus::Current,
        })
        .await
        .unwrap();
    drop(events_tx);
    worker.await.unwrap();

    let observation = collector.latest_observation();
    assert_eq!(Some(EventType::Completed), observation.last_event_type);
    assert_eq!(ResourceStatus::Current, observation.aggregate_status);

    // Sorted by identifier: the core group sorts before `apps`.
    assert_eq!("bar", observation.resources[0].identifier.name);
    assert_eq!(ResourceStatus::Unknown, observation.resources[0].status);
    assert_eq!("foo", observation.resources[1].identifier.name);
    assert_eq!(ResourceStatus::Current, observation.resources[1].status);
}

#[tokio::test]
async fn error_event_keeps_resource_state_test() {
    let ids = identifiers();
    let collector = StatusCollector::new(Handle::current(), &ids);
    let (events_tx, events_rx) = mpsc::channel(1);
    let worker = collector.observe(events_rx, CancellationToken::new());

    events_tx
        .send(updated(&ids[0], ResourceStatus::InProgress, ResourceStatus::InProgress))
        .await
        .unwrap();
    events_tx
        .send(Event::Error {
            aggregate_status: ResourceStatus::InProgress,
            error: Arc::new(ObserveError::Compute {
                message: "sync failed".to_owned(),
            }),
        })
        .await
        .unwrap();
    drop(events_tx);
    worker.await.unwrap();

    let observation = collector.latest_observation();
    assert_eq!(Some(EventType::Error), observation.last_event_type);
    assert_eq!("cannot compute status: sync failed", observation.error.unwrap().to_string());
    assert_eq!(ResourceStatus::InProgress, observation.resources[1].status);
}

#[tokio::test]
async fn stop_signal_ends_the_worker_test() {
    let collector = StatusCollector::new(Handle::current(), &identifiers());
    let (events_tx, events_rx) = mpsc::channel::<Event>(1);
    let cancellation_token = CancellationToken::new();
    let worker = collector.observe(events_rx, cancellation_token.clone());

    cancellation_token.cancel();
    worker.await.unwrap();
    drop(events_tx);
}
