use std::fmt::Display;

/// Status of a single observed resource.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceStatus {
    /// Resource has reconciled to its desired state.
    Current,

    /// Resource is being reconciled towards its desired state.
    InProgress,

    /// Reconciliation has failed and will not recover without intervention.
    Failed,

    /// Resource is scheduled for deletion.
    Terminating,

    /// Resource does not exist in the cluster.
    NotFound,

    /// Status could not be determined.
    #[default]
    Unknown,
}

impl ResourceStatus {
    /// Returns `true` if this status counts as settled for aggregation purposes.
    pub fn is_settled(self) -> bool {
        matches!(self, ResourceStatus::Current | ResourceStatus::NotFound)
    }
}

impl Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceStatus::Current => "Current",
            ResourceStatus::InProgress => "InProgress",
            ResourceStatus::Failed => "Failed",
            ResourceStatus::Terminating => "Terminating",
            ResourceStatus::NotFound => "NotFound",
            ResourceStatus::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}
