// Unit tests for Kidney Match

use kidney_match::core::{
    build_features, clamp_score, classify_risk, Aggregation, DecisionTree, FeatureVector,
    LinearModel, ModelArtifact, Regressor, ScalerParameters, TreeEnsemble, TreeNode,
    FEATURE_COUNT, FEATURE_NAMES,
};
use kidney_match::models::{DonorRecord, RecipientRecord, RiskLevel};

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

fn scaler() -> ScalerParameters {
    ScalerParameters::new(
        vec![53.5, 27.5, 95.0, 5.0, 48.5, 85.0, 60.0, 5.0, 24.0, 35.0, 1471.25, 30.0, 267.5],
        vec![20.78, 7.217, 31.754, 2.887, 17.898, 20.207, 23.094, 2.887, 16.5, 25.0, 680.0, 19.5, 195.0],
    )
    .unwrap()
}

#[test]
fn test_worked_example_features() {
    let features = build_features(&donor(), &recipient());

    assert_eq!(features.get("Patient_Age"), Some(40.0));
    assert_eq!(features.get("Donor_Weight"), Some(70.5));
    assert_eq!(features.get("Age_Difference"), Some(5.0));
    assert_eq!(features.get("Weight_Difference"), Some(4.5));
    assert_eq!(features.get("BMI_Age_Interaction"), Some(1000.0));
    assert_eq!(features.get("Health_Donor_Score"), Some(8.5 * (1.0 - 0.5)));
    assert_eq!(features.get("Age_Risk_Interaction"), Some(80.0));
}

#[test]
fn test_feature_names_order() {
    assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    assert_eq!(FEATURE_NAMES[0], "Patient_Age");
    assert_eq!(FEATURE_NAMES[7], "Risk_Score");
    assert_eq!(FEATURE_NAMES[8], "Age_Difference");
    assert_eq!(FEATURE_NAMES[12], "Age_Risk_Interaction");
}

#[test]
fn test_features_are_deterministic() {
    let first = build_features(&donor(), &recipient());
    let second = build_features(&donor(), &recipient());
    assert_eq!(first, second);
}

#[test]
fn test_scale_matches_formula() {
    let params = scaler();
    let raw = build_features(&donor(), &recipient());
    let scaled = params.scale(&raw);

    for i in 0..FEATURE_COUNT {
        let expected = (raw.values()[i] - params.mean()[i]) / params.std()[i];
        assert_eq!(scaled.values()[i], expected, "feature {}", FEATURE_NAMES[i]);
    }
}

#[test]
fn test_scale_unscale_round_trip() {
    let params = scaler();
    let vectors = [
        FeatureVector::from_values([0.0; FEATURE_COUNT]),
        FeatureVector::from_values([-3.5; FEATURE_COUNT]),
        params.scale(&build_features(&donor(), &recipient())),
    ];

    for v in vectors.iter() {
        let round_trip = params.scale(&params.unscale(v));
        for (a, b) in round_trip.values().iter().zip(v.values()) {
            assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
        }
    }
}

#[test]
fn test_clamp_invariant() {
    for raw in [-1e9, -50.0, -0.0001, 0.0, 42.0, 99.9999, 100.0, 100.0001, 1e9] {
        let score = clamp_score(raw);
        assert!((0.0..=100.0).contains(&score), "{} clamped to {}", raw, score);
    }
}

#[test]
fn test_risk_boundaries() {
    assert_eq!(classify_risk(80.0), RiskLevel::Moderate);
    assert_eq!(classify_risk(80.0001), RiskLevel::Low);
    assert_eq!(classify_risk(50.0), RiskLevel::High);
    assert_eq!(classify_risk(50.0001), RiskLevel::Moderate);
}

#[test]
fn test_linear_model_on_scaled_features() {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[8] = -8.25; // Age_Difference
    let model = LinearModel { intercept: 70.0, coefficients };
    model.validate().unwrap();

    let params = scaler();
    let scaled = params.scale(&build_features(&donor(), &recipient()));
    let expected = 70.0 + -8.25 * ((5.0 - 24.0) / 16.5);

    assert!((model.predict(&scaled).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn test_forest_from_json() {
    let json = r#"{
        "kind": "tree_ensemble",
        "aggregation": {"type": "mean"},
        "trees": [
            {"nodes": [
                {"feature": 7, "threshold": 0.0, "left": 1, "right": 2},
                {"leaf": 85.0},
                {"leaf": 40.0}
            ]},
            {"nodes": [{"leaf": 65.0}]}
        ]
    }"#;
    let model = serde_json::from_str::<ModelArtifact>(json)
        .unwrap()
        .into_regressor()
        .unwrap();

    let scaled = scaler().scale(&build_features(&donor(), &recipient()));
    // Risk_Score 2.0 scales below zero, so the first tree goes left
    assert_eq!(model.predict(&scaled).unwrap(), 75.0);
}

#[test]
fn test_ensemble_validation() {
    let empty = TreeEnsemble { aggregation: Aggregation::Mean, trees: vec![] };
    assert!(empty.validate().is_err());

    let dangling = TreeEnsemble {
        aggregation: Aggregation::Mean,
        trees: vec![DecisionTree {
            nodes: vec![TreeNode::Split { feature: 0, threshold: 0.0, left: 1, right: 5 }, TreeNode::Leaf { leaf: 1.0 }],
        }],
    };
    assert!(dangling.validate().is_err());
}
