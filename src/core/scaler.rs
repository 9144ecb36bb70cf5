use serde::{Deserialize, Serialize};

use crate::core::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::error::ArtifactError;

/// Per-feature standardization fitted at training time.
///
/// Only constructible through [`ScalerParameters::new`] (or deserialization,
/// which goes through it), so every value of this type has exactly
/// `FEATURE_COUNT` finite means and finite, non-zero standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaler", into = "RawScaler")]
pub struct ScalerParameters {
    mean: [f64; FEATURE_COUNT],
    std: [f64; FEATURE_COUNT],
}

/// On-disk scaler layout; `scale` is accepted for scikit-learn's `scale_`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    #[serde(alias = "scale")]
    std: Vec<f64>,
}

impl ScalerParameters {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self, ArtifactError> {
        let mean = to_array("mean", mean)?;
        let std = to_array("std", std)?;

        for (index, feature) in FEATURE_NAMES.iter().enumerate() {
            if !mean[index].is_finite() {
                return Err(ArtifactError::NonFinite { field: "mean", feature });
            }
            if !std[index].is_finite() {
                return Err(ArtifactError::NonFinite { field: "std", feature });
            }
            if std[index] == 0.0 {
                return Err(ArtifactError::ZeroStd { index, feature });
            }
        }

        Ok(Self { mean, std })
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn std(&self) -> &[f64; FEATURE_COUNT] {
        &self.std
    }

    /// `scaled[i] = (raw[i] - mean[i]) / std[i]`
    pub fn scale(&self, raw: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in raw.values().iter().enumerate() {
            out[i] = (value - self.mean[i]) / self.std[i];
        }
        FeatureVector::from_values(out)
    }

    /// Inverse of [`scale`](Self::scale): `raw[i] = scaled[i] * std[i] + mean[i]`
    pub fn unscale(&self, scaled: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in scaled.values().iter().enumerate() {
            out[i] = value * self.std[i] + self.mean[i];
        }
        FeatureVector::from_values(out)
    }
}

fn to_array(field: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let found = values.len();
    values.try_into().map_err(|_| ArtifactError::ScalerShape {
        field,
        expected: FEATURE_COUNT,
        found,
    })
}

impl TryFrom<RawScaler> for ScalerParameters {
    type Error = ArtifactError;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        ScalerParameters::new(raw.mean, raw.std)
    }
}

impl From<ScalerParameters> for RawScaler {
    fn from(params: ScalerParameters) -> Self {
        RawScaler {
            mean: params.mean.to_vec(),
            std: params.std.to_vec(),
        }
    }
}
