use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, Receiver};
use tokio_util::sync::CancellationToken;

use crate::compute::{DefaultStatusComputer, StatusComputer};
use crate::core::ResourceIdentifier;
use crate::error::ObserveError;
use crate::mapper::Mapper;
use crate::observers::ObserverContext;
use crate::reader::{CachedReader, ObserverReader};

use super::Event;
use super::runner::ObserveRunner;

/// Default interval between two poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Options for a single observation run.
#[derive(Clone)]
pub struct ObserveOptions {
    /// Terminate the stream with `Completed` as soon as all resources reconcile.
    pub stop_on_completed: bool,

    /// Answer all reads within one poll cycle from a single cached snapshot.
    pub use_cache: bool,

    /// Interval between two poll cycles.
    pub poll_interval: Duration,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            stop_on_completed: false,
            use_cache: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Observes statuses of k8s resources until they reconcile, the observation is cancelled
/// or an unrecoverable read error occurs.
pub struct StatusObserver {
    runtime: Handle,
    reader: Arc<dyn ObserverReader>,
    mapper: Arc<dyn Mapper>,
    computer: Arc<dyn StatusComputer>,
}

impl StatusObserver {
    /// Creates new [`StatusObserver`] instance with the default status computer.
    pub fn new(runtime: Handle, reader: Arc<dyn ObserverReader>, mapper: Arc<dyn Mapper>) -> Self {
        Self::with_computer(runtime, reader, mapper, Arc::new(DefaultStatusComputer))
    }

    /// Creates new [`StatusObserver`] instance with a custom status computer.
    pub fn with_computer(
        runtime: Handle,
        reader: Arc<dyn ObserverReader>,
        mapper: Arc<dyn Mapper>,
        computer: Arc<dyn StatusComputer>,
    ) -> Self {
        Self {
            runtime,
            reader,
            mapper,
            computer,
        }
    }

    /// Starts observing the provided identifiers in a background task.\
    /// The returned receiver is the event stream, terminated by exactly one of
    /// `Completed`, `Aborted` or `Error` and closed right after.
    pub fn observe(
        &self,
        cancellation_token: CancellationToken,
        identifiers: Vec<ResourceIdentifier>,
        options: &ObserveOptions,
    ) -> Result<Receiver<Event>, ObserveError> {
        let reader: Arc<dyn ObserverReader> = if options.use_cache {
            Arc::new(CachedReader::new(Arc::clone(&self.reader), self.mapper.as_ref(), &identifiers)?)
        } else {
            Arc::clone(&self.reader)
        };

        let context = ObserverContext {
            reader,
            mapper: Arc::clone(&self.mapper),
            computer: Arc::clone(&self.computer),
        };

        let (events_tx, events_rx) = mpsc::channel(1);
        let runner = ObserveRunner::new(
            &context,
            identifiers,
            events_tx,
            options.stop_on_completed,
            options.poll_interval,
        );
        self.runtime.spawn(runner.run(cancellation_token));

        Ok(events_rx)
    }
}
