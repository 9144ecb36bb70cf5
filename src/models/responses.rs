use serde::{Deserialize, Serialize};
use crate::models::domain::{PredictionStatus, RiskLevel};

/// Response for the predict-match endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub match_score: f64,
    pub risk_level: RiskLevel,
    pub status: PredictionStatus,
}

impl PredictionResponse {
    pub fn success(match_score: f64, risk_level: RiskLevel) -> Self {
        Self {
            match_score,
            risk_level,
            status: PredictionStatus::Success,
        }
    }
}

/// Liveness response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub service: String,
}

/// Readiness-aware health response for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub state: String,
    pub model_loaded: bool,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: PredictionStatus,
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
