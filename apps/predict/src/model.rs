//! Pre-fit scaler and ridge regression, loaded once at startup from a JSON
//! artifact and injected into handlers as an explicit dependency. No training
//! or tuning happens here; the artifact is treated as read-only.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Fixed feature order the artifact was fit with.
pub const FEATURE_NAMES: [&str; 7] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "mainroad",
    "basement",
    "parking",
];

pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Artifact field '{field}' has {actual} values, expected {expected}")]
    Shape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Deserialize)]
struct Artifact {
    scaler: ScalerParams,
    ridge: RidgeParams,
}

#[derive(Debug, Deserialize)]
struct ScalerParams {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct RidgeParams {
    coef: Vec<f64>,
    intercept: f64,
}

/// Standard-scaler plus ridge-regression pipeline over the seven housing
/// features. Deterministic: the same input always yields the same output.
#[derive(Debug)]
pub struct PricingModel {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl PricingModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let artifact: Artifact = serde_json::from_str(&raw)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: Artifact) -> Result<Self, ModelError> {
        Ok(Self {
            mean: fixed("scaler.mean", artifact.scaler.mean)?,
            scale: fixed("scaler.scale", artifact.scaler.scale)?,
            coef: fixed("ridge.coef", artifact.ridge.coef)?,
            intercept: artifact.ridge.intercept,
        })
    }

    /// Scales the feature vector and applies the regression.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut acc = self.intercept;
        for i in 0..FEATURE_COUNT {
            let scaled = (features[i] - self.mean[i]) / self.scale[i];
            acc += self.coef[i] * scaled;
        }
        acc
    }
}

fn fixed(field: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let actual = values.len();
    values.try_into().map_err(|_| ModelError::Shape {
        field,
        expected: FEATURE_COUNT,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_model() -> PricingModel {
        PricingModel {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
            coef: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            intercept: 10.0,
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = identity_model();
        let x = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(model.predict(&x), model.predict(&x));
        // intercept + sum(coef)
        assert!((model.predict(&x) - 38.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_applies_scaling() {
        let model = PricingModel {
            mean: [10.0; FEATURE_COUNT],
            scale: [2.0; FEATURE_COUNT],
            coef: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            intercept: 0.0,
        };
        // (14 - 10) / 2 = 2
        let x = [14.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert!((model.predict(&x) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_artifact_shape_mismatch_rejected() {
        let artifact: Artifact = serde_json::from_str(
            r#"{
                "scaler": {"mean": [0, 0, 0], "scale": [1, 1, 1]},
                "ridge": {"coef": [1, 1, 1], "intercept": 0}
            }"#,
        )
        .unwrap();
        let err = PricingModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::Shape { expected: 7, .. }));
    }

    #[test]
    fn test_artifact_roundtrip() {
        let artifact: Artifact = serde_json::from_str(
            r#"{
                "scaler": {
                    "mean": [5150.5, 2.97, 1.29, 1.81, 0.86, 0.35, 0.69],
                    "scale": [2170.1, 0.74, 0.5, 0.87, 0.35, 0.48, 0.86]
                },
                "ridge": {
                    "coef": [618254.9, 130742.1, 489841.0, 419482.3, 301411.5, 187652.4, 255882.8],
                    "intercept": 4766729.25
                }
            }"#,
        )
        .unwrap();
        let model = PricingModel::from_artifact(artifact).unwrap();
        let x = [7420.0, 4.0, 2.0, 3.0, 1.0, 0.0, 2.0];
        let price = model.predict(&x);
        assert!(price.is_finite());
        assert!(price > 0.0);
    }
}
