use crate::models::RiskLevel;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Scores strictly above this are LOW risk
pub const LOW_RISK_THRESHOLD: f64 = 80.0;
/// Scores strictly above this (and not LOW) are MODERATE risk
pub const MODERATE_RISK_THRESHOLD: f64 = 50.0;

/// Clamp a raw model output into `[0, 100]`.
///
/// Hard floor/ceiling, not a rescale. Callers reject non-finite scores first.
#[inline]
pub fn clamp_score(raw: f64) -> f64 {
    raw.max(MIN_SCORE).min(MAX_SCORE)
}

/// Bucket a clamped score into a risk level
///
/// `score > 80 -> LOW`, `50 < score <= 80 -> MODERATE`, `score <= 50 -> HIGH`
#[inline]
pub fn classify_risk(score: f64) -> RiskLevel {
    if score > LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score > MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}
