//! Model registry: the five loaded classifiers, keyed by disease.
//!
//! Built once at start-up and immutable afterwards. Loading is all or
//! nothing: one missing, corrupt, unverifiable or mis-ordered artifact
//! fails the whole registry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::artifacts::{ArtifactError, IntegrityPolicy, ModelDirectory};
use crate::adapters::linear::LinearClassifier;
use crate::domain::Disease;
use crate::ports::Classifier;
use crate::RiskdeskError;

/// Process-wide, read-only collection of classifiers.
pub struct ModelRegistry {
    models: BTreeMap<Disease, Arc<dyn Classifier>>,
    verified: bool,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("diseases", &self.models.keys().collect::<Vec<_>>())
            .field("verified", &self.verified)
            .finish()
    }
}

impl ModelRegistry {
    /// Load all five artifacts from `model_dir`.
    ///
    /// # Errors
    /// Returns the first failure; no registry is produced on any error.
    pub fn load(model_dir: &Path, policy: &IntegrityPolicy) -> crate::Result<Self> {
        tracing::info!("Loading classifiers from {:?}", model_dir);

        let dir = ModelDirectory::open(model_dir, policy).map_err(|source| {
            RiskdeskError::Artifact {
                disease: None,
                source,
            }
        })?;

        let mut models: BTreeMap<Disease, Arc<dyn Classifier>> = BTreeMap::new();
        for disease in Disease::ALL {
            let file = disease.artifact_file();
            let bytes = dir.read(&file).map_err(|source| RiskdeskError::Artifact {
                disease: Some(disease),
                source,
            })?;
            let classifier =
                LinearClassifier::from_json(&bytes).map_err(|e| RiskdeskError::Artifact {
                    disease: Some(disease),
                    source: ArtifactError::Parse {
                        file: file.clone(),
                        reason: e.to_string(),
                    },
                })?;

            tracing::info!(
                "Loaded {} model [{}] from {}: {}",
                disease,
                disease.registry_key(),
                file,
                classifier.describe()
            );
            models.insert(disease, Arc::new(classifier));
        }

        let registry = Self::build(models, dir.is_verified())?;
        tracing::info!(
            "Model registry ready ({} classifiers, verified={})",
            registry.models.len(),
            registry.verified
        );
        Ok(registry)
    }

    /// Build a registry from already-constructed classifiers.
    ///
    /// # Errors
    /// Returns error unless every disease has exactly one classifier whose
    /// feature names match its schema.
    pub fn from_classifiers<I>(classifiers: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (Disease, Arc<dyn Classifier>)>,
    {
        Self::build(classifiers.into_iter().collect(), false)
    }

    fn build(
        models: BTreeMap<Disease, Arc<dyn Classifier>>,
        verified: bool,
    ) -> crate::Result<Self> {
        for disease in Disease::ALL {
            let classifier = models
                .get(&disease)
                .ok_or(RiskdeskError::IncompleteRegistry(disease))?;
            check_feature_order(disease, classifier.as_ref())?;
        }
        Ok(Self { models, verified })
    }

    /// True when artifacts were bound by a verified manifest.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Score `features` with `disease`'s classifier.
    ///
    /// # Errors
    /// Returns `FeatureCountMismatch` if `features` does not have exactly one
    /// value per schema field, or `Scoring` if the classifier fails.
    pub fn predict(&self, disease: Disease, features: &[f64]) -> crate::Result<u8> {
        let expected = disease.schema().len();
        if features.len() != expected {
            tracing::error!(
                "Feature vector length {} does not match {} schema ({} fields)",
                features.len(),
                disease,
                expected
            );
            return Err(RiskdeskError::FeatureCountMismatch {
                disease,
                got: features.len(),
                expected,
            });
        }

        let classifier = self
            .models
            .get(&disease)
            .ok_or(RiskdeskError::IncompleteRegistry(disease))?;

        classifier
            .predict(features)
            .map_err(|source| RiskdeskError::Scoring { disease, source })
    }
}

/// The artifact's declared features must be the schema keys, in order.
fn check_feature_order(disease: Disease, classifier: &dyn Classifier) -> crate::Result<()> {
    let schema = disease.schema();
    let names = classifier.feature_names();

    if names.len() != schema.len() {
        return Err(RiskdeskError::SchemaMismatch {
            disease,
            detail: format!(
                "model declares {} features, schema has {}",
                names.len(),
                schema.len()
            ),
        });
    }

    for (i, (name, key)) in names.iter().zip(schema.keys()).enumerate() {
        if name != key {
            return Err(RiskdeskError::SchemaMismatch {
                disease,
                detail: format!("position {i}: model has {name:?}, schema has {key:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::linear::{ExportedLinearModel, LinearKind, FORMAT_VERSION};
    use crate::ports::ClassifierError;
    use tempfile::tempdir;

    /// Returns a fixed class and accepts any vector of the right length.
    pub(crate) struct FixedClassifier {
        names: Vec<String>,
        class: u8,
    }

    impl FixedClassifier {
        pub(crate) fn new(disease: Disease, class: u8) -> Self {
            Self {
                names: disease.schema().keys().map(String::from).collect(),
                class,
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, features: &[f64]) -> Result<u8, ClassifierError> {
            if features.len() != self.names.len() {
                return Err(ClassifierError::FeatureCount {
                    got: features.len(),
                    expected: self.names.len(),
                });
            }
            Ok(self.class)
        }

        fn feature_names(&self) -> &[String] {
            &self.names
        }
    }

    pub(crate) fn fixed_registry(class: u8) -> ModelRegistry {
        ModelRegistry::from_classifiers(Disease::ALL.map(|d| {
            (
                d,
                Arc::new(FixedClassifier::new(d, class)) as Arc<dyn Classifier>,
            )
        }))
        .expect("complete registry")
    }

    fn exported(disease: Disease) -> ExportedLinearModel {
        let n = disease.schema().len();
        ExportedLinearModel {
            format_version: FORMAT_VERSION,
            kind: LinearKind::LinearSvm,
            feature_names: disease.schema().keys().map(String::from).collect(),
            coefficients: vec![1.0; n],
            intercept: -1.0,
            scaler: None,
            threshold: None,
        }
    }

    fn write_all_models(dir: &Path) {
        for disease in Disease::ALL {
            let json = serde_json::to_vec(&exported(disease)).expect("serialize");
            std::fs::write(dir.join(disease.artifact_file()), json).expect("write model");
        }
    }

    #[test]
    fn test_load_all_five() {
        let temp = tempdir().expect("tempdir");
        write_all_models(temp.path());

        let registry =
            ModelRegistry::load(temp.path(), &IntegrityPolicy::default()).expect("load");
        assert!(!registry.is_verified());

        // All zeros: z = -1 -> class 0. Ones: z = n - 1 > 0 -> class 1.
        for disease in Disease::ALL {
            let n = disease.schema().len();
            assert_eq!(registry.predict(disease, &vec![0.0; n]).expect("score"), 0);
            assert_eq!(registry.predict(disease, &vec![1.0; n]).expect("score"), 1);
        }
    }

    #[test]
    fn test_missing_artifact_fails_startup_for_each_disease() {
        for missing in Disease::ALL {
            let temp = tempdir().expect("tempdir");
            write_all_models(temp.path());
            std::fs::remove_file(temp.path().join(missing.artifact_file())).expect("remove");

            let err = ModelRegistry::load(temp.path(), &IntegrityPolicy::default())
                .expect_err("must fail");
            match err {
                RiskdeskError::Artifact {
                    disease: Some(d),
                    source: ArtifactError::Missing(_),
                } => assert_eq!(d, missing),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_corrupt_artifact_fails_startup() {
        let temp = tempdir().expect("tempdir");
        write_all_models(temp.path());
        std::fs::write(
            temp.path().join(Disease::Parkinsons.artifact_file()),
            b"\x80\x04pickle",
        )
        .expect("write");

        let err = ModelRegistry::load(temp.path(), &IntegrityPolicy::default())
            .expect_err("must fail");
        assert!(matches!(
            err,
            RiskdeskError::Artifact {
                disease: Some(Disease::Parkinsons),
                source: ArtifactError::Parse { .. }
            }
        ));
    }

    #[test]
    fn test_misordered_features_fail_startup() {
        let temp = tempdir().expect("tempdir");
        write_all_models(temp.path());

        let mut model = exported(Disease::Diabetes);
        model.feature_names.swap(0, 1);
        std::fs::write(
            temp.path().join(Disease::Diabetes.artifact_file()),
            serde_json::to_vec(&model).expect("serialize"),
        )
        .expect("write");

        let err = ModelRegistry::load(temp.path(), &IntegrityPolicy::default())
            .expect_err("must fail");
        assert!(matches!(
            err,
            RiskdeskError::SchemaMismatch {
                disease: Disease::Diabetes,
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_registry_rejected() {
        let partial = [(
            Disease::Diabetes,
            Arc::new(FixedClassifier::new(Disease::Diabetes, 1)) as Arc<dyn Classifier>,
        )];
        let err = ModelRegistry::from_classifiers(partial).expect_err("must fail");
        assert!(matches!(
            err,
            RiskdeskError::IncompleteRegistry(Disease::HeartDisease)
        ));
    }

    #[test]
    fn test_length_mismatch_is_never_truncated() {
        let registry = fixed_registry(1);
        let err = registry
            .predict(Disease::HypoThyroid, &[0.0; 8])
            .expect_err("must fail");
        assert!(matches!(
            err,
            RiskdeskError::FeatureCountMismatch {
                disease: Disease::HypoThyroid,
                got: 8,
                expected: 7
            }
        ));
    }
}
