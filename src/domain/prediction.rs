//! Prediction result types.

use serde::{Deserialize, Serialize};

use super::disease::Disease;

/// Binary outcome of a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Classifier predicted class 1
    Positive,
    /// Any other class label
    Negative,
}

impl Verdict {
    /// Map a classifier class label to a verdict. Only `1` is positive.
    #[must_use]
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "POSITIVE"),
            Self::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// Ephemeral outcome of one dispatch. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub disease: Disease,
    pub verdict: Verdict,
}

impl PredictionResult {
    #[must_use]
    pub fn new(disease: Disease, verdict: Verdict) -> Self {
        Self { disease, verdict }
    }

    /// Message shown to the user.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.disease.verdict_message(self.verdict)
    }

    #[must_use]
    pub fn positive(&self) -> bool {
        self.verdict.is_positive()
    }
}
