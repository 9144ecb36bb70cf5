//! Kidney Match - donor/recipient match scoring service
//!
//! This library turns a donor/recipient pair into the fixed-order feature
//! vector the exported regression model was trained on, scales it, runs the
//! model and post-processes the score into a bounded, risk-bucketed response.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{build_features, clamp_score, classify_risk, FeatureVector, Regressor, ScalerParameters, FEATURE_NAMES};
pub use error::{ArtifactError, ServiceError};
pub use models::{DonorRecord, RecipientRecord, MatchPair, RiskLevel, PredictionRequest, PredictionResponse};
pub use services::{InferenceService, ModelArtifacts, ServiceState, load_artifacts};
