use actix_web::{error, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::{ErrorResponse, PredictionStatus};

/// Errors surfaced by the prediction service to its callers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Malformed request or a missing/non-numeric field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model artifacts are still loading or failed to load
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A loaded artifact does not have the expected shape
    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// Unexpected failure while building features or running the model
    #[error("Prediction error: {0}")]
    PredictionError(String),
}

impl ServiceError {
    /// Short machine-readable kind used in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::ServiceUnavailable(_) => "service_unavailable",
            ServiceError::CorruptArtifact(_) => "corrupt_artifact",
            ServiceError::PredictionError(_) => "prediction_error",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ServiceError::InvalidInput(msg)
            | ServiceError::ServiceUnavailable(msg)
            | ServiceError::CorruptArtifact(msg)
            | ServiceError::PredictionError(msg) => msg,
        }
    }

    /// Whether a caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::ServiceUnavailable(_))
    }
}

impl error::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::CorruptArtifact(_) | ServiceError::PredictionError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            status: PredictionStatus::Error,
            error: self.kind().to_string(),
            message: self.detail().to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Errors raised while loading or validating model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("scaler {field} has {found} entries, expected {expected}")]
    ScalerShape {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("scaler std for feature {feature} (index {index}) is zero")]
    ZeroStd { index: usize, feature: &'static str },

    #[error("scaler {field} for feature {feature} is not finite")]
    NonFinite {
        field: &'static str,
        feature: &'static str,
    },

    #[error("feature list has {found} names, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("feature order mismatch at position {index}: expected {expected}, found {found}")]
    FeatureOrder {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("invalid model: {0}")]
    InvalidModel(String),
}

impl From<ArtifactError> for ServiceError {
    fn from(err: ArtifactError) -> Self {
        ServiceError::CorruptArtifact(err.to_string())
    }
}
