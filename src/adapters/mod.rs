//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifacts`: model directory access, manifest hashing and signatures
//! - `linear`: JSON-exported linear classifiers
//! - `sanitize`: redaction of clinical values and key material in logs

pub mod artifacts;
pub mod linear;
pub mod sanitize;

pub use artifacts::ArtifactError;
