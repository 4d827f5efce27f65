use super::*;
use crate::compute::DefaultStatusComputer;
use crate::core::ResourceStatus;
use crate::mapper::StaticMapper;
use crate::observe::EventType;
use crate::testing::FakeReader;
use async_trait::async_trait;
use kube::api::DynamicObject;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, Receiver};

/// Observer that plays back a scripted sequence of statuses for every group kind.
struct ScriptedObserver {
    statuses: HashMap<GroupKind, Vec<ResourceStatus>>,
    counts: Mutex<HashMap<GroupKind, usize>>,
}

impl ScriptedObserver {
    fn new(statuses: Vec<(GroupKind, Vec<ResourceStatus>)>) -> Arc<dyn ResourceObserver> {
        Arc::new(Self {
            statuses: statuses.into_iter().collect(),
            counts: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl ResourceObserver for ScriptedObserver {
    async fn observe(&self, identifier: &ResourceIdentifier) -> ObservedResource {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(identifier.group_kind.clone()).or_insert(0);
        let statuses = &self.statuses[&identifier.group_kind];
        let status = statuses.get(*count).or(statuses.last()).copied().unwrap();
        *count += 1;

        ObservedResource::new(identifier.clone(), status)
    }

    async fn observe_object(&self, _object: DynamicObject) -> ObservedResource {
        unreachable!()
    }
}

fn test_runner(
    reader: FakeReader,
    identifiers: Vec<ResourceIdentifier>,
    events_tx: Sender<Event>,
    stop_on_completed: bool,
    default_observer: Arc<dyn ResourceObserver>,
) -> ObserveRunner {
    let context = ObserverContext {
        reader: Arc::new(reader),
        mapper: Arc::new(StaticMapper::new()),
        computer: Arc::new(DefaultStatusComputer),
    };
    let mut runner = ObserveRunner::new(&context, identifiers, events_tx, stop_on_completed, Duration::from_millis(10));

    // All observations go through the injected scripted observer.
    runner.observers = HashMap::new();
    runner.default_observer = default_observer;
    runner
}

async fn collect_events(mut events_rx: Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = events_rx.recv().await {
        events.push(event);
    }

    events
}

fn event_types(events: &[Event]) -> Vec<EventType> {
    events.iter().map(Event::event_type).collect()
}

fn deployment_id(namespace: &str, name: &str) -> ResourceIdentifier {
    ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), namespace, name)
}

#[tokio::test]
async fn no_resources_completes_immediately_test() {
    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(Vec::new());
    let runner = test_runner(FakeReader::new(Vec::new()), Vec::new(), events_tx, true, observer);
    tokio::spawn(runner.run(CancellationToken::new()));

    let events = collect_events(events_rx).await;

    assert_eq!(vec![EventType::Completed], event_types(&events));
    assert_eq!(ResourceStatus::Current, events[0].aggregate_status());
}

#[tokio::test]
async fn single_resource_emits_every_change_test() {
    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(vec![(
        GroupKind::new("apps", "Deployment"),
        vec![ResourceStatus::InProgress, ResourceStatus::Current],
    )]);
    let runner = test_runner(
        FakeReader::new(Vec::new()),
        vec![deployment_id("bar", "foo")],
        events_tx,
        true,
        observer,
    );
    tokio::spawn(runner.run(CancellationToken::new()));

    let events = collect_events(events_rx).await;

    assert_eq!(
        vec![EventType::ResourceUpdated, EventType::ResourceUpdated, EventType::Completed],
        event_types(&events)
    );
    assert_eq!(ResourceStatus::InProgress, events[0].aggregate_status());
    assert_eq!(ResourceStatus::Current, events[1].aggregate_status());
    assert_eq!(ResourceStatus::Current, events[2].aggregate_status());
}

#[tokio::test]
async fn multiple_resources_emit_one_event_per_change_test() {
    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(vec![
        (
            GroupKind::new("apps", "Deployment"),
            vec![ResourceStatus::InProgress, ResourceStatus::Current],
        ),
        (
            GroupKind::core("Service"),
            vec![ResourceStatus::InProgress, ResourceStatus::InProgress, ResourceStatus::Current],
        ),
    ]);
    let identifiers = vec![
        deployment_id("default", "foo"),
        ResourceIdentifier::new(GroupKind::core("Service"), "default", "bar"),
    ];
    let runner = test_runner(FakeReader::new(Vec::new()), identifiers, events_tx, true, observer);
    tokio::spawn(runner.run(CancellationToken::new()));

    let events = collect_events(events_rx).await;

    assert_eq!(
        vec![
            EventType::ResourceUpdated,
            EventType::ResourceUpdated,
            EventType::ResourceUpdated,
            EventType::ResourceUpdated,
            EventType::Completed,
        ],
        event_types(&events)
    );
}

#[tokio::test(start_paused = true)]
async fn cancellation_emits_aborted_test() {
    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(Vec::new());
    let runner = test_runner(FakeReader::new(Vec::new()), Vec::new(), events_tx, false, observer);

    let cancellation_token = CancellationToken::new();
    tokio::spawn(runner.run(cancellation_token.clone()));

    tokio::time::sleep(Duration::from_millis(55)).await;
    cancellation_token.cancel();
    let events = collect_events(events_rx).await;

    assert_eq!(vec![EventType::Aborted], event_types(&events));
}

#[tokio::test(start_paused = true)]
async fn unchanged_observations_emit_no_events_test() {
    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(vec![(GroupKind::new("apps", "Deployment"), vec![ResourceStatus::InProgress])]);
    let runner = test_runner(
        FakeReader::new(Vec::new()),
        vec![deployment_id("bar", "foo")],
        events_tx,
        false,
        observer,
    );

    let cancellation_token = CancellationToken::new();
    tokio::spawn(runner.run(cancellation_token.clone()));

    // Several poll cycles observe the very same status.
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancellation_token.cancel();
    let events = collect_events(events_rx).await;

    assert_eq!(vec![EventType::ResourceUpdated, EventType::Aborted], event_types(&events));
}

#[tokio::test]
async fn sync_error_is_terminal_test() {
    let reader = FakeReader::new(Vec::new());
    reader.set_fail_sync(true);

    let (events_tx, events_rx) = mpsc::channel(1);
    let observer = ScriptedObserver::new(vec![(GroupKind::new("apps", "Deployment"), vec![ResourceStatus::Current])]);
    let runner = test_runner(reader, vec![deployment_id("bar", "foo")], events_tx, true, observer);
    tokio::spawn(runner.run(CancellationToken::new()));

    let events = collect_events(events_rx).await;

    assert_eq!(vec![EventType::Error], event_types(&events));
    let Event::Error { error, .. } = &events[0] else {
        panic!("expected error event");
    };
    assert_eq!("cannot compute status: fake sync failure", error.to_string());
}
