//! Domain layer: Core types of the screening workflow.
//!
//! Pure Rust types with no I/O. The schema table and disease metadata are
//! static; form state and results are per-session values.

mod disease;
mod form;
mod prediction;
pub mod schema;

pub use disease::Disease;
pub use form::{FormState, DEFAULT_STEP, DEFAULT_VALUE};
pub use prediction::{PredictionResult, Verdict};
pub use schema::{DiseaseSchema, FieldKind, FieldSpec};
