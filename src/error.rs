use crate::core::GroupKind;

/// Possible errors from the observation engine.
#[derive(thiserror::Error, Debug)]
pub enum ObserveError {
    /// Group kind is not known to the mapper
    #[error("no mapping found for {group_kind}")]
    NoMapping { group_kind: GroupKind },

    /// Kubernetes API returned an error
    #[error("kubernetes api error: {0}")]
    Api(#[from] kube::Error),

    /// Label selector cannot be extracted or parsed
    #[error("invalid label selector: {message}")]
    Selector { message: String },

    /// Status cannot be computed for an object
    #[error("cannot compute status: {message}")]
    Compute { message: String },

    /// Read was issued for a pair that is not part of the cache sync domain
    #[error("{group_kind} in namespace '{namespace}' is not part of the cache sync domain")]
    NotCached { group_kind: GroupKind, namespace: String },
}
