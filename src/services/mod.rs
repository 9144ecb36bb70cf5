// Service exports
pub mod artifacts;
pub mod inference;

pub use artifacts::{ModelArtifacts, load_artifacts, check_feature_order};
pub use inference::{InferenceService, ServiceState, HealthStatus};
