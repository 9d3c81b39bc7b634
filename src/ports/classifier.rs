//! Classifier port: Trait for a pre-trained binary scoring model.
//!
//! The registry only ever talks to models through this trait, so the
//! artifact format (and any test stub) stays behind one seam.

/// Errors raised while scoring a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCount { got: usize, expected: usize },

    #[error("Non-finite feature at position {0}")]
    NonFinite(usize),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}

/// A loaded, immutable binary classifier.
///
/// Implementations must be safe to share across sessions without locking.
pub trait Classifier: Send + Sync {
    /// Score one ordered feature vector and return the class label (0 or 1).
    ///
    /// # Errors
    /// Returns `ClassifierError::FeatureCount` if `features` has the wrong length.
    fn predict(&self, features: &[f64]) -> Result<u8, ClassifierError>;

    /// Feature names in the order the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Short description for logs (model kind, feature count).
    fn describe(&self) -> String {
        format!("classifier ({} features)", self.feature_names().len())
    }
}
