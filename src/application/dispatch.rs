//! Prediction dispatcher: form -> ordered vector -> classifier -> verdict.

use std::sync::Arc;

use crate::application::ModelRegistry;
use crate::domain::{Disease, FormState, PredictionResult, Verdict};

/// Owned snapshot of a form at submit time.
///
/// Scoring only ever reads the snapshot, so later edits or a selection
/// change cannot leak into a submission already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    disease: Disease,
    features: Vec<f64>,
}

impl Submission {
    #[must_use]
    pub fn disease(&self) -> Disease {
        self.disease
    }

    /// Feature vector in schema order.
    #[must_use]
    pub fn features(&self) -> &[f64] {
        &self.features
    }
}

/// Turns explicit submit actions into prediction results.
#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
}

impl PredictionDispatcher {
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Project `form` into its schema's feature order.
    ///
    /// `features[i]` is always the value of `schema.fields[i].key`.
    #[must_use]
    pub fn assemble(form: &FormState) -> Submission {
        let schema = form.schema();
        let features = schema
            .keys()
            .map(|key| form.value(key).unwrap_or_default())
            .collect();
        Submission {
            disease: schema.disease,
            features,
        }
    }

    /// Score a snapshot.
    ///
    /// # Errors
    /// Propagates registry errors (length mismatch, scoring failure).
    pub fn score(&self, submission: &Submission) -> crate::Result<PredictionResult> {
        let class = self
            .registry
            .predict(submission.disease, &submission.features)?;
        let result = PredictionResult::new(submission.disease, Verdict::from_class(class));

        tracing::info!(
            "Prediction complete: disease={}, n_features={}, verdict={}",
            result.disease,
            submission.features.len(),
            result.verdict
        );
        Ok(result)
    }

    /// Assemble and score the current form. Called once per submit action.
    ///
    /// # Errors
    /// Propagates registry errors (length mismatch, scoring failure).
    pub fn dispatch(&self, form: &FormState) -> crate::Result<PredictionResult> {
        let submission = Self::assemble(form);
        self.score(&submission)
    }
}
