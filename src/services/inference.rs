use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::core::{build_features, clamp_score, classify_risk};
use crate::error::{ArtifactError, ServiceError};
use crate::models::{MatchPair, PredictionRequest, PredictionResponse};
use crate::services::artifacts::ModelArtifacts;

/// Lifecycle of the loaded artifacts
///
/// `Uninitialized -> Loading -> Ready | Degraded`, with no way back to
/// `Loading` short of a process restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceState {
    Uninitialized,
    Loading,
    Ready,
    Degraded,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Uninitialized => "UNINITIALIZED",
            ServiceState::Loading => "LOADING",
            ServiceState::Ready => "READY",
            ServiceState::Degraded => "DEGRADED",
        }
    }
}

/// Result of the `healthCheck` operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub state: ServiceState,
    pub model_loaded: bool,
}

/// Prediction service holding the process-wide model/scaler pair.
///
/// The pair is published exactly once through a `OnceLock`; afterwards every
/// request reads it without locking.
#[derive(Debug, Default)]
pub struct InferenceService {
    loading: AtomicBool,
    artifacts: OnceLock<Result<ModelArtifacts, String>>,
}

impl InferenceService {
    /// A service with nothing loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A service that is `Ready` with the given artifacts
    pub fn ready(artifacts: ModelArtifacts) -> Self {
        let service = Self::new();
        service.load_with(|| Ok(artifacts));
        service
    }

    /// A service whose artifact load failed
    pub fn degraded(reason: impl Into<String>) -> Self {
        let service = Self::new();
        service.loading.store(true, Ordering::Release);
        let _ = service.artifacts.set(Err(reason.into()));
        service
    }

    pub fn state(&self) -> ServiceState {
        match self.artifacts.get() {
            Some(Ok(_)) => ServiceState::Ready,
            Some(Err(_)) => ServiceState::Degraded,
            None if self.loading.load(Ordering::Acquire) => ServiceState::Loading,
            None => ServiceState::Uninitialized,
        }
    }

    /// Run the artifact loader once.
    ///
    /// A failed or panicking load leaves the service `Degraded` instead of
    /// aborting the process. Calls after the first are ignored.
    pub fn load_with<F>(&self, loader: F) -> ServiceState
    where
        F: FnOnce() -> Result<ModelArtifacts, ArtifactError>,
    {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Artifact load already started, ignoring reload request");
            return self.state();
        }

        tracing::info!("Loading model artifacts...");

        let outcome = match catch_unwind(AssertUnwindSafe(loader)) {
            Ok(Ok(artifacts)) => {
                tracing::info!("Model artifacts loaded, service is READY");
                Ok(artifacts)
            }
            Ok(Err(e)) => {
                tracing::error!("Failed to load model artifacts, service is DEGRADED: {}", e);
                Err(e.to_string())
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!("Artifact loader panicked, service is DEGRADED: {}", reason);
                Err(format!("artifact loader panicked: {}", reason))
            }
        };

        let _ = self.artifacts.set(outcome);
        self.state()
    }

    pub fn health_check(&self) -> HealthStatus {
        let state = self.state();
        let status = match state {
            ServiceState::Ready => "ok",
            ServiceState::Degraded => "degraded",
            ServiceState::Uninitialized | ServiceState::Loading => "loading",
        };

        HealthStatus {
            status,
            state,
            model_loaded: state == ServiceState::Ready,
        }
    }

    /// Score a raw JSON request body.
    ///
    /// Validation runs first and never touches the model; everything after
    /// that requires the service to be `Ready`.
    pub fn predict_match(&self, body: &[u8]) -> Result<PredictionResponse, ServiceError> {
        let pair = PredictionRequest::from_json(body)?;
        self.predict(&pair)
    }

    /// Score an already validated donor/recipient pair
    pub fn predict(&self, pair: &MatchPair) -> Result<PredictionResponse, ServiceError> {
        let artifacts = self.artifacts()?;

        let features = build_features(&pair.donor, &pair.recipient);
        let scaled = artifacts.scaler.scale(&features);

        let raw = artifacts
            .model
            .predict(&scaled)
            .map_err(|e| ServiceError::PredictionError(e.to_string()))?;

        if !raw.is_finite() {
            return Err(ServiceError::PredictionError(format!(
                "{} model returned a non-finite score ({})",
                artifacts.model.name(),
                raw
            )));
        }

        let match_score = clamp_score(raw);
        let risk_level = classify_risk(match_score);

        tracing::debug!(
            "Raw score {:.4} clamped to {:.4} ({})",
            raw,
            match_score,
            risk_level
        );

        Ok(PredictionResponse::success(match_score, risk_level))
    }

    fn artifacts(&self) -> Result<&ModelArtifacts, ServiceError> {
        match self.artifacts.get() {
            Some(Ok(artifacts)) => Ok(artifacts),
            Some(Err(reason)) => Err(ServiceError::ServiceUnavailable(format!(
                "model artifacts failed to load: {}",
                reason
            ))),
            None => Err(ServiceError::ServiceUnavailable(
                "model artifacts are not loaded yet".to_string(),
            )),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
