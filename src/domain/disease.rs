//! The closed set of screenable diseases.
//!
//! Everything that differs between the five prediction pages (titles,
//! artifact names, verdict wording) hangs off [`Disease`], so rendering and
//! dispatch stay a single table-driven routine.

use serde::{Deserialize, Serialize};

use super::prediction::Verdict;
use super::schema::{self, DiseaseSchema};

/// A disease with its own pre-trained classifier and input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    HypoThyroid,
}

impl Disease {
    /// All diseases in sidebar display order. The first entry is the default selection.
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
        Disease::LungCancer,
        Disease::HypoThyroid,
    ];

    /// Name shown in the navigation menu.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Parkinsons => "Parkinson's",
            Self::LungCancer => "Lung Cancer",
            Self::HypoThyroid => "Hypo-Thyroid",
        }
    }

    /// Stable key naming the classifier in load logs.
    #[must_use]
    pub fn registry_key(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart_disease",
            Self::Parkinsons => "parkinsons",
            Self::LungCancer => "lung_cancer",
            Self::HypoThyroid => "thyroid",
        }
    }

    /// File stem of the exported classifier inside the model directory.
    #[must_use]
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model",
            Self::HeartDisease => "heart_disease_model",
            Self::Parkinsons => "parkinsons_model",
            Self::LungCancer => "lungs_disease_model",
            Self::HypoThyroid => "Thyroid_model",
        }
    }

    /// Artifact file name (`<stem>.json`).
    #[must_use]
    pub fn artifact_file(&self) -> String {
        format!("{}.json", self.artifact_stem())
    }

    /// Page heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Prediction",
            Self::HeartDisease => "Heart Disease Prediction",
            Self::Parkinsons => "Parkinson's Disease Prediction",
            Self::LungCancer => "Lung Cancer Prediction",
            Self::HypoThyroid => "Hypo-Thyroid Prediction",
        }
    }

    /// One-line instruction under the heading.
    #[must_use]
    pub fn intro(&self) -> &'static str {
        match self {
            Self::Diabetes => "Enter the following details to predict diabetes risk.",
            Self::HeartDisease => "Enter the following details to predict heart disease risk.",
            Self::Parkinsons => {
                "Enter the following details to predict Parkinson's disease risk."
            }
            Self::LungCancer => "Enter the following details to predict lung cancer risk.",
            Self::HypoThyroid => "Enter the following details to predict hypo-thyroid risk.",
        }
    }

    /// Label of the submit control.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Predict Diabetes",
            Self::HeartDisease => "Predict Heart Disease",
            Self::Parkinsons => "Predict Parkinson's",
            Self::LungCancer => "Predict Lung Cancer",
            Self::HypoThyroid => "Predict Hypo-Thyroid",
        }
    }

    /// Message displayed for a verdict on this disease.
    #[must_use]
    pub fn verdict_message(&self, verdict: Verdict) -> &'static str {
        match (self, verdict) {
            (Self::Diabetes, Verdict::Positive) => "The person is diabetic.",
            (Self::Diabetes, Verdict::Negative) => "The person is not diabetic.",
            (Self::HeartDisease, Verdict::Positive) => "The person has heart disease.",
            (Self::HeartDisease, Verdict::Negative) => "The person does not have heart disease.",
            (Self::Parkinsons, Verdict::Positive) => "The person has Parkinson's disease.",
            (Self::Parkinsons, Verdict::Negative) => {
                "The person does not have Parkinson's disease."
            }
            (Self::LungCancer, Verdict::Positive) => "The person has lung cancer.",
            (Self::LungCancer, Verdict::Negative) => "The person does not have lung cancer.",
            (Self::HypoThyroid, Verdict::Positive) => "The person has Hypo-Thyroid disease.",
            (Self::HypoThyroid, Verdict::Negative) => {
                "The person does not have Hypo-Thyroid disease."
            }
        }
    }

    /// Ordered input schema for this disease's classifier.
    #[must_use]
    pub fn schema(&self) -> &'static DiseaseSchema {
        schema::schema_for(*self)
    }

    /// Position in display order.
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Next disease in display order (wraps).
    #[must_use]
    pub fn next(&self) -> Disease {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous disease in display order (wraps).
    #[must_use]
    pub fn prev(&self) -> Disease {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl Default for Disease {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
