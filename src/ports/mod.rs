//! Ports layer: Trait definitions for external collaborators.
//!
//! The pre-trained models are produced outside this crate; this trait is
//! the boundary the application layer scores through.

mod classifier;

pub use classifier::{Classifier, ClassifierError};
