use k8s_openapi::serde_json::Value;
use kube::api::DynamicObject;

use crate::core::ResourceStatus;
use crate::error::ObserveError;

#[cfg(test)]
#[path = "./compute.tests.rs"]
mod compute_tests;

/// Computed status for a single resource together with a human readable explanation.
#[derive(Debug, Clone)]
pub struct StatusResult {
    pub status: ResourceStatus,
    pub message: String,
}

impl StatusResult {
    /// Creates new [`StatusResult`] instance.
    pub fn new(status: ResourceStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Computes [`StatusResult`] for a single k8s object.
pub trait StatusComputer: Send + Sync {
    fn compute(&self, object: &DynamicObject) -> Result<StatusResult, ObserveError>;
}

/// Status computer that uses generic rules only: deletion timestamp, observed generation,
/// the `phase` field, well known conditions and replica counters.
#[derive(Default)]
pub struct DefaultStatusComputer;

impl StatusComputer for DefaultStatusComputer {
    fn compute(&self, object: &DynamicObject) -> Result<StatusResult, ObserveError> {
        if object.metadata.deletion_timestamp.is_some() {
            return Ok(StatusResult::new(
                ResourceStatus::Terminating,
                "Resource is scheduled for deletion",
            ));
        }

        let status = &object.data["status"];
        if !status.is_null() && !status.is_object() {
            return Err(ObserveError::Compute {
                message: "status is not an object".to_owned(),
            });
        }

        if let Some(generation) = object.metadata.generation
            && let Some(observed) = status["observedGeneration"].as_i64()
            && observed < generation
        {
            return Ok(StatusResult::new(
                ResourceStatus::InProgress,
                "Controller has not observed the latest generation",
            ));
        }

        if let Some(result) = from_phase(status) {
            return Ok(result);
        }

        if let Some(message) = condition_message(status, &["Failed", "ReplicaFailure"], "True") {
            return Ok(StatusResult::new(ResourceStatus::Failed, message));
        }

        if let Some(replicas) = object.data["spec"]["replicas"].as_i64() {
            let ready = status["readyReplicas"].as_i64().unwrap_or(0);
            let status = if ready < replicas {
                ResourceStatus::InProgress
            } else {
                ResourceStatus::Current
            };
            return Ok(StatusResult::new(status, format!("Ready: {ready}/{replicas}")));
        }

        if let Some(message) = condition_message(status, &["Ready", "Available"], "False") {
            return Ok(StatusResult::new(ResourceStatus::InProgress, message));
        }

        Ok(StatusResult::new(ResourceStatus::Current, "Resource is current"))
    }
}

/// Maps well known pod-like phases to a [`StatusResult`], other phases are left to further rules.
fn from_phase(status: &Value) -> Option<StatusResult> {
    match status["phase"].as_str()? {
        "Succeeded" => Some(StatusResult::new(ResourceStatus::Current, "Resource has completed")),
        "Failed" => Some(StatusResult::new(ResourceStatus::Failed, "Resource has failed")),
        "Pending" => Some(StatusResult::new(ResourceStatus::InProgress, "Resource is pending")),
        "Running" => {
            if has_condition(status, "Ready", "True") {
                Some(StatusResult::new(ResourceStatus::Current, "Resource is running and ready"))
            } else {
                Some(StatusResult::new(
                    ResourceStatus::InProgress,
                    "Resource is running but not ready",
                ))
            }
        },
        _ => None,
    }
}

fn has_condition(status: &Value, condition_type: &str, condition_status: &str) -> bool {
    find_condition(status, &[condition_type], condition_status).is_some()
}

/// Returns the message of the first matched condition (falls back to the condition type).
fn condition_message(status: &Value, types: &[&str], condition_status: &str) -> Option<String> {
    let condition = find_condition(status, types, condition_status)?;
    match condition["message"].as_str() {
        Some(message) if !message.is_empty() => Some(message.to_owned()),
        _ => Some(format!("Condition {} is {}", condition["type"].as_str()?, condition_status)),
    }
}

fn find_condition<'a>(status: &'a Value, types: &[&str], condition_status: &str) -> Option<&'a Value> {
    status["conditions"].as_array()?.iter().find(|condition| {
        condition["type"].as_str().is_some_and(|t| types.contains(&t))
            && condition["status"].as_str() == Some(condition_status)
    })
}
