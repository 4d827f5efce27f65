pub use self::aggregator::StatusAggregator;
pub use self::collector::{Observation, StatusCollector};
pub use self::compute::{DefaultStatusComputer, StatusComputer, StatusResult};
pub use self::core::{DEFAULT_NAMESPACE, GroupKind, ObservedResource, ResourceIdentifier, ResourceStatus};
pub use self::error::ObserveError;
pub use self::mapper::{DiscoveryMapper, Mapper, RestMapping, StaticMapper};
pub use self::observe::{DEFAULT_POLL_INTERVAL, Event, EventType, ObserveOptions, StatusObserver};
pub use self::reader::{ApiReader, CachedReader, ObserverReader};

pub mod observers;

mod aggregator;
mod collector;
mod compute;
mod core;
mod error;
mod mapper;
mod observe;
mod reader;

#[cfg(test)]
pub(crate) mod testing;
