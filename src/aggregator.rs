use std::collections::HashMap;

use crate::core::{ObservedResource, ResourceIdentifier, ResourceStatus};

#[cfg(test)]
#[path = "./aggregator.tests.rs"]
mod aggregator_tests;

/// Folds statuses of all observed resources into one aggregate status.\
/// The aggregate is `Current` only when every covered resource is settled
/// (current or not found).
pub struct StatusAggregator {
    statuses: HashMap<ResourceIdentifier, ResourceStatus>,
}

impl StatusAggregator {
    /// Creates new [`StatusAggregator`] instance covering the provided identifiers.
    pub fn new(identifiers: &[ResourceIdentifier]) -> Self {
        Self {
            statuses: identifiers
                .iter()
                .map(|id| (id.clone(), ResourceStatus::Unknown))
                .collect(),
        }
    }

    /// Records the latest observation of a single resource.
    pub fn resource_observed(&mut self, observed: &ObservedResource) {
        self.statuses.insert(observed.identifier.clone(), observed.status);
    }

    /// Returns the aggregate status of all covered resources.
    pub fn aggregate_status(&self) -> ResourceStatus {
        let mut any_unknown = false;
        let mut all_settled = true;

        for status in self.statuses.values() {
            match status {
                ResourceStatus::Failed => return ResourceStatus::Failed,
                ResourceStatus::Unknown => any_unknown = true,
                _ => (),
            }

            if !status.is_settled() {
                all_settled = false;
            }
        }

        if any_unknown {
            ResourceStatus::Unknown
        } else if all_settled {
            ResourceStatus::Current
        } else {
            ResourceStatus::InProgress
        }
    }

    /// Returns `true` if all covered resources have reconciled.
    pub fn completed(&self) -> bool {
        self.aggregate_status() == ResourceStatus::Current
    }
}
