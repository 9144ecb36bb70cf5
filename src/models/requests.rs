use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ServiceError;
use crate::models::domain::{DonorRecord, MatchPair, RecipientRecord};

/// Request body for `POST /predict-match`
///
/// ```json
/// {
///   "donor": {"Donor_Age": 35, "Donor_Weight": 70.5},
///   "recipient": {
///     "Patient_Age": 40, "Patient_BMI": 25.0, "Patient_Weight": 75.0,
///     "Biological_Markers": 5.0, "RealTime_Organ_HealthScore": 8.5,
///     "Risk_Score": 2.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PredictionRequest {
    #[validate(nested)]
    pub donor: DonorData,
    #[validate(nested)]
    pub recipient: RecipientData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DonorData {
    #[serde(rename = "Donor_Age")]
    #[validate(range(min = 0, message = "Donor_Age must be zero or greater"))]
    pub age: i64,
    #[serde(rename = "Donor_Weight")]
    #[validate(range(exclusive_min = 0.0, message = "Donor_Weight must be greater than zero"))]
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RecipientData {
    #[serde(rename = "Patient_Age")]
    pub age: i64,
    #[serde(rename = "Patient_BMI")]
    pub bmi: f64,
    #[serde(rename = "Patient_Weight")]
    pub weight: f64,
    #[serde(rename = "Biological_Markers")]
    pub biological_markers: f64,
    #[serde(rename = "RealTime_Organ_HealthScore")]
    pub organ_health_score: f64,
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
}

impl PredictionRequest {
    /// Parse and validate a raw JSON body.
    ///
    /// Every field is required and unknown fields are rejected, so a body
    /// that gets through here maps one-to-one onto the typed records.
    pub fn from_json(body: &[u8]) -> Result<MatchPair, ServiceError> {
        let request: PredictionRequest = serde_json::from_slice(body)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        request.into_pair()
    }

    /// Validate field ranges and convert into domain records
    pub fn into_pair(self) -> Result<MatchPair, ServiceError> {
        self.validate()
            .map_err(|errors| ServiceError::InvalidInput(errors.to_string()))?;

        Ok(MatchPair {
            donor: DonorRecord::from(self.donor),
            recipient: RecipientRecord::from(self.recipient),
        })
    }
}

impl From<DonorData> for DonorRecord {
    fn from(data: DonorData) -> Self {
        DonorRecord {
            age: data.age,
            weight: data.weight,
        }
    }
}

impl From<RecipientData> for RecipientRecord {
    fn from(data: RecipientData) -> Self {
        RecipientRecord {
            age: data.age,
            bmi: data.bmi,
            weight: data.weight,
            biological_markers: data.biological_markers,
            organ_health_score: data.organ_health_score,
            risk_score: data.risk_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "donor": {"Donor_Age": 35, "Donor_Weight": 70.5},
        "recipient": {
            "Patient_Age": 40, "Patient_BMI": 25.0, "Patient_Weight": 75.0,
            "Biological_Markers": 5.0, "RealTime_Organ_HealthScore": 8.5,
            "Risk_Score": 2.0
        }
    }"#;

    fn expect_invalid(body: &str) -> String {
        match PredictionRequest::from_json(body.as_bytes()) {
            Err(ServiceError::InvalidInput(msg)) => msg,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_request() {
        let pair = PredictionRequest::from_json(VALID.as_bytes()).unwrap();

        assert_eq!(pair.donor.age, 35);
        assert_eq!(pair.donor.weight, 70.5);
        assert_eq!(pair.recipient.age, 40);
        assert_eq!(pair.recipient.organ_health_score, 8.5);
        assert_eq!(pair.recipient.risk_score, 2.0);
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let body = VALID.replace("\"Risk_Score\": 2.0", "\"Other\": 1");
        let msg = expect_invalid(&body);
        assert!(msg.contains("Other") || msg.contains("Risk_Score"), "{}", msg);

        let body = r#"{"donor": {"Donor_Weight": 70.5}, "recipient": {
            "Patient_Age": 40, "Patient_BMI": 25.0, "Patient_Weight": 75.0,
            "Biological_Markers": 5.0, "RealTime_Organ_HealthScore": 8.5,
            "Risk_Score": 2.0}}"#;
        let msg = expect_invalid(body);
        assert!(msg.contains("Donor_Age"), "{}", msg);
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let body = VALID.replace("\"Patient_BMI\": 25.0", "\"Patient_BMI\": \"25\"");
        expect_invalid(&body);
    }

    #[test]
    fn test_fractional_age_rejected() {
        let body = VALID.replace("\"Donor_Age\": 35", "\"Donor_Age\": 35.5");
        expect_invalid(&body);
    }

    #[test]
    fn test_whole_number_float_age_rejected() {
        // Integer fields are strict: 35.0 is not coerced to 35
        let body = VALID.replace("\"Donor_Age\": 35", "\"Donor_Age\": 35.0");
        let msg = expect_invalid(&body);
        assert!(msg.contains("invalid type"), "{}", msg);

        let body = VALID.replace("\"Patient_Age\": 40", "\"Patient_Age\": 40.0");
        expect_invalid(&body);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let body = VALID.replace("\"Donor_Age\": 35,", "\"Donor_Age\": 35, \"Blood_Type\": 1,");
        let msg = expect_invalid(&body);
        assert!(msg.contains("Blood_Type"), "{}", msg);
    }

    #[test]
    fn test_range_rules() {
        let body = VALID.replace("\"Donor_Age\": 35", "\"Donor_Age\": -1");
        let msg = expect_invalid(&body);
        assert!(msg.contains("Donor_Age"), "{}", msg);

        let body = VALID.replace("\"Donor_Weight\": 70.5", "\"Donor_Weight\": 0.0");
        let msg = expect_invalid(&body);
        assert!(msg.contains("Donor_Weight"), "{}", msg);
    }

    #[test]
    fn test_empty_body_rejected() {
        expect_invalid("");
        expect_invalid("{}");
    }
}
