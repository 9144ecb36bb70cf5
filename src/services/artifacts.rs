use serde::de::DeserializeOwned;
use std::path::Path;

use crate::config::ArtifactSettings;
use crate::core::{ModelArtifact, Regressor, ScalerParameters, FEATURE_COUNT, FEATURE_NAMES};
use crate::error::ArtifactError;

/// The immutable model/scaler pair shared by every request
#[derive(Debug)]
pub struct ModelArtifacts {
    pub model: Box<dyn Regressor>,
    pub scaler: ScalerParameters,
}

impl ModelArtifacts {
    pub fn new(model: Box<dyn Regressor>, scaler: ScalerParameters) -> Self {
        Self { model, scaler }
    }
}

/// Load and validate the model, scaler and optional feature list
pub fn load_artifacts(settings: &ArtifactSettings) -> Result<ModelArtifacts, ArtifactError> {
    if let Some(features_path) = &settings.features_path {
        let names: Vec<String> = read_json(features_path)?;
        check_feature_order(&names)?;
        tracing::debug!("Feature order verified against {}", features_path.display());
    }

    let scaler: ScalerParameters = read_json(&settings.scaler_path)?;
    let artifact: ModelArtifact = read_json(&settings.model_path)?;
    let model = artifact.into_regressor()?;

    tracing::info!(
        "Loaded {} model from {} and scaler from {}",
        model.name(),
        settings.model_path.display(),
        settings.scaler_path.display()
    );

    Ok(ModelArtifacts::new(model, scaler))
}

/// Verify an exported feature list matches the serving column order
pub fn check_feature_order(names: &[String]) -> Result<(), ArtifactError> {
    if names.len() != FEATURE_COUNT {
        return Err(ArtifactError::FeatureCount {
            expected: FEATURE_COUNT,
            found: names.len(),
        });
    }

    for (index, (expected, found)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if *expected != found.as_str() {
            return Err(ArtifactError::FeatureOrder {
                index,
                expected: *expected,
                found: found.clone(),
            });
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}
