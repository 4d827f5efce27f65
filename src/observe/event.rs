use std::sync::Arc;

use crate::core::{ObservedResource, ResourceStatus};
use crate::error::ObserveError;

/// Discriminant of [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    ResourceUpdated,
    Completed,
    Aborted,
    Error,
}

/// Event streamed to the consumer of an observation.\
/// **Note** that `Completed`, `Aborted` and `Error` are terminal: the runner emits exactly
/// one of them and closes the stream right after.
#[derive(Debug, Clone)]
pub enum Event {
    /// Observation of a single resource has changed.
    ResourceUpdated {
        aggregate_status: ResourceStatus,
        resource: Box<ObservedResource>,
    },

    /// All observed resources have reconciled.
    Completed { aggregate_status: ResourceStatus },

    /// Observation was cancelled.
    Aborted { aggregate_status: ResourceStatus },

    /// Observation failed and cannot continue.
    Error {
        aggregate_status: ResourceStatus,
        error: Arc<ObserveError>,
    },
}

impl Event {
    /// Returns the [`EventType`] of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::ResourceUpdated { .. } => EventType::ResourceUpdated,
            Event::Completed { .. } => EventType::Completed,
            Event::Aborted { .. } => EventType::Aborted,
            Event::Error { .. } => EventType::Error,
        }
    }

    /// Returns the aggregate status carried by this event.
    pub fn aggregate_status(&self) -> ResourceStatus {
        match self {
            Event::ResourceUpdated { aggregate_status, .. }
            | Event::Completed { aggregate_status }
            | Event::Aborted { aggregate_status }
            | Event::Error { aggregate_status, .. } => *aggregate_status,
        }
    }
}
