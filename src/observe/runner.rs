use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use crate::aggregator::StatusAggregator;
use crate::core::{GroupKind, ObservedResource, ResourceIdentifier};
use crate::error::ObserveError;
use crate::observers::{ObserverContext, ResourceObserver, create_observers};
use crate::reader::ObserverReader;

use super::Event;

#[cfg(test)]
#[path = "./runner.tests.rs"]
mod runner_tests;

/// Outcome of a single poll cycle.
enum PollOutcome {
    Continue,
    Completed,
    Detached,
    Failed(ObserveError),
}

/// Polls all identifiers on every tick and emits an event for every change.
pub(crate) struct ObserveRunner {
    reader: Arc<dyn ObserverReader>,
    identifiers: Vec<ResourceIdentifier>,
    observers: HashMap<GroupKind, Arc<dyn ResourceObserver>>,
    default_observer: Arc<dyn ResourceObserver>,
    previous: HashMap<ResourceIdentifier, ObservedResource>,
    aggregator: StatusAggregator,
    events_tx: Sender<Event>,
    stop_on_completed: bool,
    poll_interval: Duration,
}

impl ObserveRunner {
    /// Creates new [`ObserveRunner`] instance.
    pub fn new(
        context: &ObserverContext,
        identifiers: Vec<ResourceIdentifier>,
        events_tx: Sender<Event>,
        stop_on_completed: bool,
        poll_interval: Duration,
    ) -> Self {
        let (observers, default_observer) = create_observers(context);
        Self {
            reader: Arc::clone(&context.reader),
            aggregator: StatusAggregator::new(&identifiers),
            identifiers,
            observers,
            default_observer,
            previous: HashMap::new(),
            events_tx,
            stop_on_completed,
            poll_interval,
        }
    }

    /// Runs the poll loop until a terminal event is emitted.\
    /// **Note** that the event stream closes when this task ends, strictly after the
    /// terminal event.
    pub async fn run(mut self, cancellation_token: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancellation_token.cancelled() => {
                    self.send_aborted().await;
                    return;
                },
                _ = ticker.tick() => {
                    let outcome = tokio::select! {
                        () = cancellation_token.cancelled() => None,
                        outcome = self.poll_once() => Some(outcome),
                    };

                    match outcome {
                        None => {
                            self.send_aborted().await;
                            return;
                        },
                        Some(PollOutcome::Continue) => (),
                        Some(PollOutcome::Detached) => return,
                        Some(PollOutcome::Completed) => {
                            let aggregate_status = self.aggregator.aggregate_status();
                            self.send_terminal(Event::Completed { aggregate_status }, &cancellation_token).await;
                            return;
                        },
                        Some(PollOutcome::Failed(error)) => {
                            tracing::warn!("Stopping observation, sync failed: {}", error);
                            let aggregate_status = self.aggregator.aggregate_status();
                            let event = Event::Error {
                                aggregate_status,
                                error: Arc::new(error),
                            };
                            self.send_terminal(event, &cancellation_token).await;
                            return;
                        },
                    }
                },
            }
        }
    }

    /// Syncs the reader and observes all identifiers once, in their input order.
    async fn poll_once(&mut self) -> PollOutcome {
        if let Err(error) = self.reader.sync().await {
            return PollOutcome::Failed(error);
        }

        for index in 0..self.identifiers.len() {
            let identifier = self.identifiers[index].clone();
            let observer = self.observer_for(&identifier.group_kind);
            let observed = observer.observe(&identifier).await;

            self.aggregator.resource_observed(&observed);
            if self.previous.get(&identifier) != Some(&observed) {
                self.previous.insert(identifier, observed.clone());
                let aggregate_status = self.aggregator.aggregate_status();
                if !self
                    .send(Event::ResourceUpdated {
                        aggregate_status,
                        resource: Box::new(observed),
                    })
                    .await
                {
                    return PollOutcome::Detached;
                }

                if self.stop_on_completed && self.aggregator.completed() {
                    return PollOutcome::Completed;
                }
            }
        }

        if self.stop_on_completed && self.aggregator.completed() {
            return PollOutcome::Completed;
        }

        PollOutcome::Continue
    }

    fn observer_for(&self, group_kind: &GroupKind) -> Arc<dyn ResourceObserver> {
        Arc::clone(self.observers.get(group_kind).unwrap_or(&self.default_observer))
    }

    async fn send_aborted(&self) {
        let aggregate_status = self.aggregator.aggregate_status();
        self.send(Event::Aborted { aggregate_status }).await;
    }

    /// Sends a terminal event, giving up when the observation is cancelled mid-send.
    async fn send_terminal(&self, event: Event, cancellation_token: &CancellationToken) {
        tokio::select! {
            () = cancellation_token.cancelled() => (),
            _ = self.send(event) => (),
        }
    }

    /// Sends the event to the consumer, returns `false` if the consumer is gone.
    async fn send(&self, event: Event) -> bool {
        self.events_tx.send(event).await.is_ok()
    }
}
