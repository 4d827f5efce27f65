pub const DEFAULT_NAMESPACE: &str = "default";

pub const APPS_GROUP: &str = "apps";
pub const BATCH_GROUP: &str = "batch";

pub const DEPLOYMENT: &str = "Deployment";
pub const REPLICA_SET: &str = "ReplicaSet";
pub const STATEFUL_SET: &str = "StatefulSet";
pub const JOB: &str = "Job";
pub const POD: &str = "Pod";
pub const SERVICE: &str = "Service";

pub use self::identifier::{GroupKind, ResourceIdentifier};
pub use self::observed::ObservedResource;
pub use self::status::ResourceStatus;

mod identifier;
mod observed;
mod status;
