//! # Riskdesk
#![allow(non_snake_case)]
//!
//! Terminal screening desk for five pre-trained binary disease classifiers:
//! Diabetes, Heart Disease, Parkinson's, Lung Cancer and Hypo-Thyroid.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Diseases, field schemas, form state, verdicts
//! - `ports`: The `Classifier` trait
//! - `adapters`: Artifact loading/verification, linear models, log sanitizing
//! - `application`: Model registry, prediction dispatch, selection session
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Disease, PredictionResult, Verdict};

/// Result type for Riskdesk operations
pub type Result<T> = std::result::Result<T, RiskdeskError>;

/// Main error type for Riskdesk
#[derive(Debug, thiserror::Error)]
pub enum RiskdeskError {
    #[error("{}", artifact_message(.disease, .source))]
    Artifact {
        disease: Option<Disease>,
        #[source]
        source: adapters::ArtifactError,
    },

    #[error("{disease} model does not match its input schema: {detail}")]
    SchemaMismatch { disease: Disease, detail: String },

    #[error("No classifier registered for {0}")]
    IncompleteRegistry(Disease),

    #[error("{disease} expects {expected} values, got {got}")]
    FeatureCountMismatch {
        disease: Disease,
        got: usize,
        expected: usize,
    },

    #[error("{disease} model failed to score input: {source}")]
    Scoring {
        disease: Disease,
        #[source]
        source: ports::ClassifierError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

fn artifact_message(disease: &Option<Disease>, source: &adapters::ArtifactError) -> String {
    match disease {
        Some(d) => format!("Failed to load {d} model: {source}"),
        None => format!("Failed to open model directory: {source}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_artifact_error_names_disease() {
        let err = RiskdeskError::Artifact {
            disease: Some(Disease::LungCancer),
            source: adapters::ArtifactError::Missing(PathBuf::from("Models/lungs_disease_model.json")),
        };
        let message = err.to_string();
        assert!(message.starts_with("Failed to load Lung Cancer model"));
        assert!(message.contains("lungs_disease_model.json"));
    }

    #[test]
    fn test_feature_count_message() {
        let err = RiskdeskError::FeatureCountMismatch {
            disease: Disease::Diabetes,
            got: 7,
            expected: 8,
        };
        assert_eq!(err.to_string(), "Diabetes expects 8 values, got 7");
    }
}
