//! Linear classifier adapter: Implementation of `Classifier` for exported linear models.
//!
//! The training pipeline exports each fitted model (logistic regression or a
//! linear-kernel SVM, optionally behind a standard scaler) as JSON:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "kind": "linear_svm",
//!   "feature_names": ["Pregnancies", "Glucose", "..."],
//!   "coefficients": [0.12, 0.03, "..."],
//!   "intercept": -7.9,
//!   "scaler": { "mean": ["..."], "scale": ["..."] },
//!   "threshold": 0.5
//! }
//! ```
//!
//! Scoring: `z = w · x' + b` where `x' = (x - mean) / scale` when a scaler is
//! present. Logistic models predict 1 when `sigmoid(z) >= threshold`; linear
//! SVMs predict 1 when `z > 0`.

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ClassifierError};

/// Only artifact layout understood by this adapter.
pub const FORMAT_VERSION: u32 = 1;

/// Default logistic decision threshold.
const DEFAULT_THRESHOLD: f64 = 0.5;

/// Family of the exported linear model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearKind {
    Logistic,
    LinearSvm,
}

/// Per-feature standardization fitted at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub format_version: u32,
    pub kind: LinearKind,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// A validated, immutable linear classifier.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    model: ExportedLinearModel,
}

impl LinearClassifier {
    /// Validate exported parameters and wrap them.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidArtifact` if the parameters are inconsistent.
    pub fn from_model(model: ExportedLinearModel) -> Result<Self, ClassifierError> {
        if model.format_version != FORMAT_VERSION {
            return Err(ClassifierError::InvalidArtifact(format!(
                "Unsupported format_version {} (expected {FORMAT_VERSION})",
                model.format_version
            )));
        }

        let n = model.feature_names.len();
        if n == 0 {
            return Err(ClassifierError::InvalidArtifact(
                "Model declares no features".into(),
            ));
        }
        if model.coefficients.len() != n {
            return Err(ClassifierError::InvalidArtifact(format!(
                "coefficients has {} entries, feature_names has {n}",
                model.coefficients.len()
            )));
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "Model parameters must be finite".into(),
            ));
        }

        if let Some(scaler) = &model.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ClassifierError::InvalidArtifact(
                    "Scaler parameter lengths do not match feature_names length".into(),
                ));
            }
            if scaler.mean.iter().any(|m| !m.is_finite())
                || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(ClassifierError::InvalidArtifact(
                    "Scaler mean must be finite and scale finite and non-zero".into(),
                ));
            }
        }

        if let Some(t) = model.threshold {
            if !(t > 0.0 && t < 1.0) {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "threshold {t} must lie in (0, 1)"
                )));
            }
        }

        Ok(Self { model })
    }

    /// Parse and validate an exported JSON artifact.
    ///
    /// # Errors
    /// Returns `ClassifierError::InvalidArtifact` on malformed JSON or parameters.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let model: ExportedLinearModel = serde_json::from_slice(bytes)
            .map_err(|e| ClassifierError::InvalidArtifact(e.to_string()))?;
        Self::from_model(model)
    }

    #[must_use]
    pub fn kind(&self) -> LinearKind {
        self.model.kind
    }

    /// Raw margin `w · x' + b`.
    ///
    /// # Errors
    /// Returns an error if the vector length is wrong or contains non-finite values.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        let n = self.model.coefficients.len();
        if features.len() != n {
            return Err(ClassifierError::FeatureCount {
                got: features.len(),
                expected: n,
            });
        }
        if let Some(i) = features.iter().position(|x| !x.is_finite()) {
            return Err(ClassifierError::NonFinite(i));
        }

        let z = features
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let x = match &self.model.scaler {
                    Some(s) => (x - s.mean[i]) / s.scale[i],
                    None => *x,
                };
                x * self.model.coefficients[i]
            })
            .sum::<f64>()
            + self.model.intercept;

        Ok(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &[f64]) -> Result<u8, ClassifierError> {
        let z = self.decision_function(features)?;
        let positive = match self.model.kind {
            LinearKind::Logistic => {
                sigmoid(z) >= self.model.threshold.unwrap_or(DEFAULT_THRESHOLD)
            }
            LinearKind::LinearSvm => z > 0.0,
        };
        Ok(u8::from(positive))
    }

    fn feature_names(&self) -> &[String] {
        &self.model.feature_names
    }

    fn describe(&self) -> String {
        format!(
            "{:?} (n_features={}, scaled={})",
            self.model.kind,
            self.model.feature_names.len(),
            self.model.scaler.is_some()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(kind: LinearKind) -> ExportedLinearModel {
        ExportedLinearModel {
            format_version: FORMAT_VERSION,
            kind,
            feature_names: vec!["a".into(), "b".into()],
            coefficients: vec![1.0, -2.0],
            intercept: 0.5,
            scaler: None,
            threshold: None,
        }
    }

    #[test]
    fn test_linear_svm_sign() {
        let clf = LinearClassifier::from_model(model(LinearKind::LinearSvm)).expect("valid");
        // z = 3 - 2 + 0.5 = 1.5
        assert_eq!(clf.predict(&[3.0, 1.0]).expect("score"), 1);
        // z = 0 - 2 + 0.5 = -1.5
        assert_eq!(clf.predict(&[0.0, 1.0]).expect("score"), 0);
    }

    #[test]
    fn test_logistic_threshold() {
        let mut m = model(LinearKind::Logistic);
        m.threshold = Some(0.9);
        let clf = LinearClassifier::from_model(m).expect("valid");
        // sigmoid(1.5) ~ 0.82 < 0.9
        assert_eq!(clf.predict(&[3.0, 1.0]).expect("score"), 0);
        // sigmoid(10.5) ~ 1.0
        assert_eq!(clf.predict(&[12.0, 1.0]).expect("score"), 1);
    }

    #[test]
    fn test_scaler_is_applied() {
        let mut m = model(LinearKind::LinearSvm);
        m.scaler = Some(StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        });
        let clf = LinearClassifier::from_model(m).expect("valid");
        // ((12 - 10) / 2) * 1 + 0 + 0.5 = 1.5
        let z = clf.decision_function(&[12.0, 0.0]).expect("score");
        assert!((z - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_feature_count() {
        let clf = LinearClassifier::from_model(model(LinearKind::Logistic)).expect("valid");
        let err = clf.predict(&[1.0]).expect_err("must fail");
        assert_eq!(err, ClassifierError::FeatureCount { got: 1, expected: 2 });
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let clf = LinearClassifier::from_model(model(LinearKind::Logistic)).expect("valid");
        let err = clf.predict(&[1.0, f64::NAN]).expect_err("must fail");
        assert_eq!(err, ClassifierError::NonFinite(1));
    }

    #[test]
    fn test_inconsistent_parameters_rejected() {
        let mut m = model(LinearKind::Logistic);
        m.coefficients.pop();
        assert!(LinearClassifier::from_model(m).is_err());

        let mut m = model(LinearKind::Logistic);
        m.scaler = Some(StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        });
        assert!(LinearClassifier::from_model(m).is_err());

        let mut m = model(LinearKind::Logistic);
        m.format_version = 7;
        assert!(LinearClassifier::from_model(m).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = br#"{
            "format_version": 1,
            "kind": "logistic",
            "feature_names": ["x"],
            "coefficients": [2.0],
            "intercept": -1.0
        }"#;
        let clf = LinearClassifier::from_json(json).expect("parse");
        assert_eq!(clf.kind(), LinearKind::Logistic);
        assert_eq!(clf.feature_names(), ["x".to_string()]);
        assert_eq!(clf.predict(&[1.0]).expect("score"), 1);

        assert!(LinearClassifier::from_json(b"not json").is_err());
    }
}
