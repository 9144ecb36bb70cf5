// Core pipeline exports
pub mod features;
pub mod regressor;
pub mod scaler;
pub mod scoring;

pub use features::{build_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use regressor::{Aggregation, DecisionTree, LinearModel, ModelArtifact, ModelError, Regressor, TreeEnsemble, TreeNode};
pub use scaler::ScalerParameters;
pub use scoring::{clamp_score, classify_risk};
