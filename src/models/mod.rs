// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DonorRecord, RecipientRecord, MatchPair, RiskLevel, PredictionStatus};
pub use requests::{PredictionRequest, DonorData, RecipientData};
pub use responses::{PredictionResponse, RootResponse, HealthResponse, ErrorResponse};
