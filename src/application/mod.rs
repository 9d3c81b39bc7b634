//! Application layer: the model registry, prediction dispatch and the
//! interactive selection session.

mod dispatch;
pub(crate) mod registry;
mod session;

pub use dispatch::{PredictionDispatcher, Submission};
pub use registry::ModelRegistry;
pub use session::{Outcome, Session};
