use serde::{Deserialize, Serialize};

/// Donor attributes consumed by the feature pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonorRecord {
    /// Years, never negative
    pub age: i64,
    /// Kilograms, strictly positive
    pub weight: f64,
}

/// Recipient attributes consumed by the feature pipeline
///
/// `organ_health_score` and `risk_score` are taken as already-known inputs,
/// in whatever unit the upstream caller sends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipientRecord {
    pub age: i64,
    pub bmi: f64,
    pub weight: f64,
    /// 0-10 scale, lower is better
    pub biological_markers: f64,
    pub organ_health_score: f64,
    pub risk_score: f64,
}

/// A validated donor/recipient pair ready for scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPair {
    pub donor: DonorRecord,
    pub recipient: RecipientRecord,
}

/// Risk bucket derived from a clamped match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_wire_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"MODERATE\"");
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
        assert_eq!(RiskLevel::Moderate.to_string(), "MODERATE");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&PredictionStatus::Success).unwrap(), "\"SUCCESS\"");
        assert_eq!(serde_json::to_string(&PredictionStatus::Error).unwrap(), "\"ERROR\"");
    }
}
