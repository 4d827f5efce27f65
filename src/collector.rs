use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::{ObservedResource, ResourceIdentifier, ResourceStatus};
use crate::error::ObserveError;
use crate::observe::{Event, EventType};

#[cfg(test)]
#[path = "./collector.tests.rs"]
mod collector_tests;

/// Externally readable snapshot of the latest observation state.
#[derive(Clone)]
pub struct Observation {
    pub last_event_type: Option<EventType>,
    pub aggregate_status: ResourceStatus,
    pub resources: Vec<ObservedResource>,
    pub error: Option<Arc<ObserveError>>,
}

struct CollectorState {
    last_event_type: Option<EventType>,
    aggregate_status: ResourceStatus,
    observations: HashMap<ResourceIdentifier, ObservedResource>,
    error: Option<Arc<ObserveError>>,
}

/// Consumes an event stream into a concurrently readable snapshot.
pub struct StatusCollector {
    runtime: Handle,
    state: Arc<RwLock<CollectorState>>,
}

impl StatusCollector {
    /// Creates new [`StatusCollector`] instance covering the provided identifiers.\
    /// Every covered resource starts as `Unknown`, so the snapshot is complete from the start.
    pub fn new(runtime: Handle, identifiers: &[ResourceIdentifier]) -> Self {
        let observations = identifiers
            .iter()
            .map(|id| (id.clone(), ObservedResource::new(id.clone(), ResourceStatus::Unknown)))
            .collect();

        Self {
            runtime,
            state: Arc::new(RwLock::new(CollectorState {
                last_event_type: None,
                aggregate_status: ResourceStatus::Unknown,
                observations,
                error: None,
            })),
        }
    }

    /// Starts consuming `events` until the stream closes or `cancellation_token` fires.\
    /// The returned handle completes when the worker is done.
    pub fn observe(&self, mut events: Receiver<Event>, cancellation_token: CancellationToken) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        self.runtime.spawn(async move {
            loop {
                tokio::select! {
                    () = cancellation_token.cancelled() => return,
                    event = events.recv() => match event {
                        Some(event) => process_event(&state, event),
                        None => return,
                    },
                }
            }
        })
    }

    /// Returns a defensive copy of the latest observation state, sorted by identifier.
    pub fn latest_observation(&self) -> Observation {
        let state = self.state.read().expect("collector lock poisoned");
        let mut resources = state.observations.values().cloned().collect::<Vec<_>>();
        resources.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        Observation {
            last_event_type: state.last_event_type,
            aggregate_status: state.aggregate_status,
            resources,
            error: state.error.clone(),
        }
    }
}

fn process_event(state: &RwLock<CollectorState>, event: Event) {
    let mut state = state.write().expect("collector lock poisoned");
    state.last_event_type = Some(event.event_type());
    state.aggregate_status = event.aggregate_status();

    match event {
        Event::Error { error, .. } => state.error = Some(error),
        Event::ResourceUpdated { resource, .. } => {
            state.observations.insert(resource.identifier.clone(), *resource);
        },
        _ => (),
    }
}
