use super::*;
use crate::core::GroupKind;

fn identifiers(count: usize) -> Vec<ResourceIdentifier> {
    (0..count)
        .map(|i| ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "default", format!("foo-{i}")))
        .collect()
}

fn observe(aggregator: &mut StatusAggregator, identifier: &ResourceIdentifier, status: ResourceStatus) {
    aggregator.resource_observed(&ObservedResource::new(identifier.clone(), status));
}

#[test]
fn empty_set_is_current_test() {
    let aggregator = StatusAggregator::new(&[]);
    assert_eq!(ResourceStatus::Current, aggregator.aggregate_status());
    assert!(aggregator.completed());
}

#[test]
fn covers_exactly_the_input_set_test() {
    let ids = identifiers(3);
    let mut aggregator = StatusAggregator::new(&ids);
    assert_eq!(3, aggregator.statuses.len());

    // Repeated observations overwrite, they never grow the set.
    observe(&mut aggregator, &ids[0], ResourceStatus::InProgress);
    observe(&mut aggregator, &ids[0], ResourceStatus::Current);
    assert_eq!(3, aggregator.statuses.len());
}

#[test]
fn unobserved_resources_are_unknown_test() {
    let ids = identifiers(2);
    let mut aggregator = StatusAggregator::new(&ids);
    assert_eq!(ResourceStatus::Unknown, aggregator.aggregate_status());

    observe(&mut aggregator, &ids[0], ResourceStatus::Current);
    assert_eq!(ResourceStatus::Unknown, aggregator.aggregate_status());
}

#[test]
fn failed_resource_dominates_test() {
    let ids = identifiers(3);
    let mut aggregator = StatusAggregator::new(&ids);
    observe(&mut aggregator, &ids[0], ResourceStatus::Current);
    observe(&mut aggregator, &ids[1], ResourceStatus::Failed);

    assert_eq!(ResourceStatus::Failed, aggregator.aggregate_status());
    assert!(!aggregator.completed());
}

#[test]
fn settled_resources_are_current_test() {
    let ids = identifiers(2);
    let mut aggregator = StatusAggregator::new(&ids);
    observe(&mut aggregator, &ids[0], ResourceStatus::Current);
    observe(&mut aggregator, &ids[1], ResourceStatus::NotFound);

    assert_eq!(ResourceStatus::Current, aggregator.aggregate_status());
    assert!(aggregator.completed());
}

#[test]
fn unsettled_resources_are_in_progress_test() {
    let ids = identifiers(3);
    let mut aggregator = StatusAggregator::new(&ids);
    observe(&mut aggregator, &ids[0], ResourceStatus::Current);
    observe(&mut aggregator, &ids[1], ResourceStatus::InProgress);
    observe(&mut aggregator, &ids[2], ResourceStatus::Terminating);

    assert_eq!(ResourceStatus::InProgress, aggregator.aggregate_status());
    assert!(!aggregator.completed());
}
