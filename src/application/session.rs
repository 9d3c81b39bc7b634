//! Navigation and selection: which disease is active and its form.

use crate::application::PredictionDispatcher;
use crate::domain::{Disease, FormState, PredictionResult};

/// What the result area shows after the last submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Result(PredictionResult),
    Error(String),
}

/// Interactive state: exactly one disease is active at a time.
#[derive(Debug, Clone)]
pub struct Session {
    form: FormState,
    outcome: Option<Outcome>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start on the default disease with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: FormState::new(Disease::default()),
            outcome: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> Disease {
        self.form.disease()
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable form access. Any edit invalidates the displayed outcome.
    pub fn form_mut(&mut self) -> &mut FormState {
        self.outcome = None;
        &mut self.form
    }

    /// Move focus to the next field. The outcome stays on screen.
    pub fn focus_next(&mut self) {
        self.form.focus_next();
    }

    pub fn focus_prev(&mut self) {
        self.form.focus_prev();
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Switch the active disease.
    ///
    /// Changing selection discards the previous form (values are zeroized)
    /// and any shown result. Re-selecting the active disease keeps both.
    pub fn select(&mut self, disease: Disease) {
        if disease == self.active() {
            return;
        }
        tracing::debug!("Selection changed: {} -> {}", self.active(), disease);
        self.form.reset();
        self.form = FormState::new(disease);
        self.outcome = None;
    }

    pub fn select_next(&mut self) {
        self.select(self.active().next());
    }

    pub fn select_prev(&mut self) {
        self.select(self.active().prev());
    }

    /// Run one prediction for the active form and record the outcome.
    pub fn submit(&mut self, dispatcher: &PredictionDispatcher) -> &Outcome {
        let outcome = match dispatcher.dispatch(&self.form) {
            Ok(result) => Outcome::Result(result),
            Err(e) => {
                tracing::error!("Prediction failed for {}: {}", self.active(), e);
                Outcome::Error(e.to_string())
            }
        };
        self.outcome.insert(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::tests::fixed_registry;
    use crate::domain::Verdict;
    use std::sync::Arc;

    fn dispatcher(class: u8) -> PredictionDispatcher {
        PredictionDispatcher::new(Arc::new(fixed_registry(class)))
    }

    #[test]
    fn test_starts_on_diabetes() {
        let session = Session::new();
        assert_eq!(session.active(), Disease::Diabetes);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_exactly_one_active_while_cycling() {
        let mut session = Session::new();
        for expected in Disease::ALL.iter().cycle().skip(1).take(10) {
            session.select_next();
            assert_eq!(session.active(), *expected);
            assert_eq!(session.form().schema().disease, *expected);
        }
        session.select_prev();
        assert_eq!(session.active(), Disease::HypoThyroid);
    }

    #[test]
    fn test_selection_change_discards_values() {
        let mut session = Session::new();
        session.form_mut().set("Age", 55.0);
        session.select(Disease::HeartDisease);
        session.select(Disease::Diabetes);
        assert_eq!(session.form().value("Age"), Some(0.0));
    }

    #[test]
    fn test_reselecting_active_is_noop() {
        let mut session = Session::new();
        session.form_mut().set("Glucose", 140.0);
        session.submit(&dispatcher(1));
        session.select(Disease::Diabetes);
        assert_eq!(session.form().value("Glucose"), Some(140.0));
        assert!(session.outcome().is_some());
    }

    #[test]
    fn test_submit_records_verdict_for_active_disease() {
        let mut session = Session::new();
        session.select(Disease::Parkinsons);
        let outcome = session.submit(&dispatcher(1)).clone();
        match outcome {
            Outcome::Result(result) => {
                assert_eq!(result.disease, Disease::Parkinsons);
                assert_eq!(result.verdict, Verdict::Positive);
            }
            Outcome::Error(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_selection_change_clears_outcome() {
        let mut session = Session::new();
        session.submit(&dispatcher(0));
        session.select_next();
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_edit_clears_outcome() {
        let mut session = Session::new();
        session.submit(&dispatcher(0));
        session.form_mut().input_char('1');
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_focus_move_keeps_outcome() {
        let mut session = Session::new();
        session.submit(&dispatcher(1));
        session.focus_next();
        session.focus_next();
        session.focus_prev();
        assert_eq!(session.form().focused(), 1);
        assert!(matches!(session.outcome(), Some(Outcome::Result(_))));
    }

    #[test]
    fn test_submission_snapshot_survives_selection_change() {
        let mut session = Session::new();
        session.form_mut().set("Pregnancies", 3.0);
        let submission = PredictionDispatcher::assemble(session.form());

        session.select(Disease::LungCancer);

        assert_eq!(submission.disease(), Disease::Diabetes);
        assert_eq!(submission.features().len(), 8);
        assert_eq!(submission.features()[0], 3.0);
        let result = dispatcher(0).score(&submission).expect("score");
        assert_eq!(result.disease, Disease::Diabetes);
    }
}
