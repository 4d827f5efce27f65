use super::*;
use crate::testing::object_with;
use k8s_openapi::serde_json::json;

fn compute(body: k8s_openapi::serde_json::Value) -> StatusResult {
    let object = object_with("apps/v1", "Deployment", "default", "foo", None, body);
    DefaultStatusComputer.compute(&object).unwrap()
}

#[test]
fn terminating_resource_test() {
    let object = object_with(
        "v1",
        "Pod",
        "default",
        "foo",
        None,
        json!({ "metadata": { "name": "foo", "namespace": "default", "deletionTimestamp": "2026-01-01T00:00:00Z" } }),
    );
    let result = DefaultStatusComputer.compute(&object).unwrap();

    assert_eq!(ResourceStatus::Terminating, result.status);
}

#[test]
fn no_status_is_current_test() {
    let result = compute(json!({}));
    assert_eq!(ResourceStatus::Current, result.status);
    assert_eq!("Resource is current", result.message);
}

#[test]
fn stale_observed_generation_test() {
    let object = crate::testing::object_from(json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": "foo", "namespace": "default", "generation": 2 },
        "status": { "observedGeneration": 1 },
    }));
    let result = DefaultStatusComputer.compute(&object).unwrap();

    assert_eq!(ResourceStatus::InProgress, result.status);
}

#[test]
fn pod_phases_test() {
    let result = compute(json!({ "status": { "phase": "Succeeded" } }));
    assert_eq!(ResourceStatus::Current, result.status);

    let result = compute(json!({ "status": { "phase": "Failed" } }));
    assert_eq!(ResourceStatus::Failed, result.status);

    let result = compute(json!({ "status": { "phase": "Pending" } }));
    assert_eq!(ResourceStatus::InProgress, result.status);

    let result = compute(json!({
        "status": { "phase": "Running", "conditions": [{ "type": "Ready", "status": "True" }] }
    }));
    assert_eq!(ResourceStatus::Current, result.status);

    let result = compute(json!({
        "status": { "phase": "Running", "conditions": [{ "type": "Ready", "status": "False" }] }
    }));
    assert_eq!(ResourceStatus::InProgress, result.status);
}

#[test]
fn failed_condition_test() {
    let result = compute(json!({
        "status": { "conditions": [{ "type": "ReplicaFailure", "status": "True", "message": "quota exceeded" }] }
    }));

    assert_eq!(ResourceStatus::Failed, result.status);
    assert_eq!("quota exceeded", result.message);
}

#[test]
fn replica_counters_test() {
    let result = compute(json!({
        "spec": { "replicas": 3 },
        "status": { "readyReplicas": 1 },
    }));
    assert_eq!(ResourceStatus::InProgress, result.status);
    assert_eq!("Ready: 1/3", result.message);

    let result = compute(json!({
        "spec": { "replicas": 3 },
        "status": { "readyReplicas": 3 },
    }));
    assert_eq!(ResourceStatus::Current, result.status);
    assert_eq!("Ready: 3/3", result.message);

    let result = compute(json!({ "spec": { "replicas": 2 } }));
    assert_eq!(ResourceStatus::InProgress, result.status);
    assert_eq!("Ready: 0/2", result.message);
}

#[test]
fn not_ready_condition_test() {
    let result = compute(json!({
        "status": { "conditions": [{ "type": "Available", "status": "False" }] }
    }));

    assert_eq!(ResourceStatus::InProgress, result.status);
    assert_eq!("Condition Available is False", result.message);
}

#[test]
fn malformed_status_test() {
    let object = object_with("v1", "Service", "default", "foo", None, json!({ "status": 42 }));
    let error = DefaultStatusComputer.compute(&object).unwrap_err();

    assert_eq!("cannot compute status: status is not an object", error.to_string());
}
