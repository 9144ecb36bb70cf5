use crate::models::{DonorRecord, RecipientRecord};

/// Number of columns the scaler and model were fitted on
pub const FEATURE_COUNT: usize = 13;

/// Column order the scaler and model were fitted on.
///
/// The model only sees positions, never names, so this order is part of the
/// artifact contract: eight base fields followed by five engineered ones.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Patient_Age",
    "Patient_BMI",
    "Patient_Weight",
    "Biological_Markers",
    "Donor_Age",
    "Donor_Weight",
    "RealTime_Organ_HealthScore",
    "Risk_Score",
    "Age_Difference",
    "Weight_Difference",
    "BMI_Age_Interaction",
    "Health_Donor_Score",
    "Age_Risk_Interaction",
];

/// Fixed-order numeric encoding of one donor/recipient pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Look up a column by its training-time name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Iterate `(name, value)` pairs in column order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

/// Build the model feature vector from a donor and recipient
///
/// Engineered columns:
/// - `Age_Difference = |Patient_Age - Donor_Age|`
/// - `Weight_Difference = |Patient_Weight - Donor_Weight|`
/// - `BMI_Age_Interaction = Patient_BMI * Patient_Age`
/// - `Health_Donor_Score = RealTime_Organ_HealthScore * (1 - Biological_Markers / 10)`
/// - `Age_Risk_Interaction = Patient_Age * Risk_Score`
pub fn build_features(donor: &DonorRecord, recipient: &RecipientRecord) -> FeatureVector {
    let patient_age = recipient.age as f64;
    let donor_age = donor.age as f64;

    let age_difference = (patient_age - donor_age).abs();
    let weight_difference = (recipient.weight - donor.weight).abs();
    let bmi_age_interaction = recipient.bmi * patient_age;
    let health_donor_score =
        recipient.organ_health_score * (1.0 - recipient.biological_markers / 10.0);
    let age_risk_interaction = patient_age * recipient.risk_score;

    FeatureVector::from_values([
        patient_age,
        recipient.bmi,
        recipient.weight,
        recipient.biological_markers,
        donor_age,
        donor.weight,
        recipient.organ_health_score,
        recipient.risk_score,
        age_difference,
        weight_difference,
        bmi_age_interaction,
        health_donor_score,
        age_risk_interaction,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor() -> DonorRecord {
        DonorRecord { age: 35, weight: 70.5 }
    }

    fn recipient() -> RecipientRecord {
        RecipientRecord {
            age: 40,
            bmi: 25.0,
            weight: 75.0,
            biological_markers: 5.0,
            organ_health_score: 8.5,
            risk_score: 2.0,
        }
    }

    #[test]
    fn test_engineered_features() {
        let features = build_features(&donor(), &recipient());

        assert_eq!(features.get("Age_Difference"), Some(5.0));
        assert_eq!(features.get("Weight_Difference"), Some(4.5));
        assert_eq!(features.get("BMI_Age_Interaction"), Some(1000.0));
        assert_eq!(features.get("Health_Donor_Score"), Some(4.25));
        assert_eq!(features.get("Age_Risk_Interaction"), Some(80.0));
    }

    #[test]
    fn test_column_order() {
        let features = build_features(&donor(), &recipient());

        assert_eq!(
            features.values(),
            &[40.0, 25.0, 75.0, 5.0, 35.0, 70.5, 8.5, 2.0, 5.0, 4.5, 1000.0, 4.25, 80.0]
        );

        let names: Vec<&str> = features.named().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
    }

    #[test]
    fn test_differences_are_absolute() {
        // Donor older and heavier than the recipient
        let donor = DonorRecord { age: 60, weight: 90.0 };
        let features = build_features(&donor, &recipient());

        assert_eq!(features.get("Age_Difference"), Some(20.0));
        assert_eq!(features.get("Weight_Difference"), Some(15.0));
    }

    #[test]
    fn test_unknown_name() {
        let features = build_features(&donor(), &recipient());
        assert_eq!(features.get("Blood_Type"), None);
    }
}
