use actix_web::{web, HttpResponse, Responder};
use crate::error::ServiceError;
use crate::models::{HealthResponse, RootResponse};
use crate::services::InferenceService;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<InferenceService>,
}

/// Configure all prediction-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/predict-match", web::post().to(predict_match));
}

/// Liveness endpoint
///
/// Always reports `ok`, even while artifacts are loading or failed to load.
/// Use `/health` for readiness.
async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        status: "ok".to_string(),
        service: "ML Service".to_string(),
    })
}

/// Readiness endpoint reflecting the artifact load state
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let health = state.inference.health_check();

    HttpResponse::Ok().json(HealthResponse {
        status: health.status.to_string(),
        state: health.state.as_str().to_string(),
        model_loaded: health.model_loaded,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Predict match endpoint
///
/// POST /predict-match
///
/// Request body:
/// ```json
/// {
///   "donor": {"Donor_Age": 35, "Donor_Weight": 70.5},
///   "recipient": {"Patient_Age": 40, "Patient_BMI": 25.0, "Patient_Weight": 75.0,
///                 "Biological_Markers": 5.0, "RealTime_Organ_HealthScore": 8.5,
///                 "Risk_Score": 2.0}
/// }
/// ```
async fn predict_match(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ServiceError> {
    let request_id = uuid::Uuid::new_v4();

    match state.inference.predict_match(&body) {
        Ok(response) => {
            tracing::info!(
                "Prediction {}: score={:.2}, risk={}",
                request_id,
                response.match_score,
                response.risk_level
            );
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            match &e {
                ServiceError::InvalidInput(_) => {
                    tracing::info!("Prediction {} rejected: {}", request_id, e)
                }
                ServiceError::ServiceUnavailable(_) => {
                    tracing::warn!("Prediction {} refused: {}", request_id, e)
                }
                ServiceError::CorruptArtifact(_) | ServiceError::PredictionError(_) => {
                    tracing::error!("Prediction {} failed: {}", request_id, e)
                }
            }
            Err(e)
        }
    }
}
