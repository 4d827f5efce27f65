use super::*;
use crate::core::GroupKind;

fn deployment(name: &str) -> ResourceIdentifier {
    ResourceIdentifier::new(GroupKind::new("apps", "Deployment"), "default", name)
}

fn replica_set(name: &str, status: ResourceStatus) -> ObservedResource {
    ObservedResource::new(
        ResourceIdentifier::new(GroupKind::new("apps", "ReplicaSet"), "default", name),
        status,
    )
}

#[test]
fn same_observation_is_equal_test() {
    let mut left = ObservedResource::new(deployment("foo"), ResourceStatus::Unknown);
    left.message = Some("Some message".to_owned());
    let mut right = ObservedResource::new(deployment("foo"), ResourceStatus::Unknown);
    right.message = Some("Some message".to_owned());

    assert_eq!(left, right);
}

#[test]
fn different_name_is_not_equal_test() {
    let left = ObservedResource::new(deployment("foo"), ResourceStatus::Current);
    let right = ObservedResource::new(deployment("bar"), ResourceStatus::Current);

    assert_ne!(left, right);
}

#[test]
fn different_group_is_not_equal_test() {
    let left = ObservedResource::new(deployment("foo"), ResourceStatus::Current);
    let right = ObservedResource::new(
        ResourceIdentifier::new(GroupKind::new("custom.io", "Deployment"), "default", "foo"),
        ResourceStatus::Current,
    );

    assert_ne!(left, right);
}

#[test]
fn same_error_message_is_equal_test() {
    let left = ObservedResource::errored(
        deployment("foo"),
        ObserveError::Compute {
            message: "this is a test".to_owned(),
        },
    );
    let right = ObservedResource::errored(
        deployment("foo"),
        ObserveError::Compute {
            message: "this is a test".to_owned(),
        },
    );

    assert_eq!(left, right);
}

#[test]
fn missing_error_on_one_side_is_not_equal_test() {
    let left = ObservedResource::errored(
        deployment("foo"),
        ObserveError::Compute {
            message: "this is a test".to_owned(),
        },
    );
    let right = ObservedResource::new(deployment("foo"), ResourceStatus::Unknown);

    assert_ne!(left, right);
}

#[test]
fn different_status_is_not_equal_test() {
    let left = ObservedResource::new(deployment("foo"), ResourceStatus::Current);
    let right = ObservedResource::new(deployment("foo"), ResourceStatus::InProgress);

    assert_ne!(left, right);
}

#[test]
fn different_generated_length_is_not_equal_test() {
    let left = ObservedResource::new(deployment("foo"), ResourceStatus::InProgress)
        .with_generated(vec![replica_set("foo-123", ResourceStatus::InProgress)]);
    let right = ObservedResource::new(deployment("foo"), ResourceStatus::InProgress);

    assert_ne!(left, right);
}

#[test]
fn different_generated_status_is_not_equal_test() {
    let left = ObservedResource::new(deployment("foo"), ResourceStatus::InProgress)
        .with_generated(vec![replica_set("foo-123", ResourceStatus::InProgress)]);
    let right = ObservedResource::new(deployment("foo"), ResourceStatus::InProgress)
        .with_generated(vec![replica_set("foo-123", ResourceStatus::Current)]);

    assert_ne!(left, right);
}

#[test]
fn raw_resource_is_ignored_test() {
    let object = crate::testing::object("apps/v1", "Deployment", "default", "foo", None);

    let left = ObservedResource::new(deployment("foo"), ResourceStatus::Current).with_resource(object);
    let right = ObservedResource::new(deployment("foo"), ResourceStatus::Current);

    assert_eq!(left, right);
}
