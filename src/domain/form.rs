//! Per-session form state for the active disease.

use std::collections::BTreeMap;

use zeroize::Zeroize;

use super::disease::Disease;
use super::schema::{DiseaseSchema, FieldKind, FieldSpec};

/// Increment applied by [`FormState::step`].
pub const DEFAULT_STEP: f64 = 1.0;

/// Value of an empty or unparseable field.
pub const DEFAULT_VALUE: f64 = 0.0;

/// Raw input buffers for one disease, aligned with its schema.
///
/// Values are kept as typed text and coerced on read: empty or
/// unparseable input reads as [`DEFAULT_VALUE`]. No range checks.
#[derive(Debug, Clone)]
pub struct FormState {
    disease: Disease,
    buffers: Vec<String>,
    focused: usize,
}

impl FormState {
    /// Empty form for `disease`.
    #[must_use]
    pub fn new(disease: Disease) -> Self {
        Self {
            disease,
            buffers: vec![String::new(); disease.schema().len()],
            focused: 0,
        }
    }

    #[must_use]
    pub fn disease(&self) -> Disease {
        self.disease
    }

    #[must_use]
    pub fn schema(&self) -> &'static DiseaseSchema {
        self.disease.schema()
    }

    #[must_use]
    pub fn focused(&self) -> usize {
        self.focused
    }

    #[must_use]
    pub fn focused_field(&self) -> &'static FieldSpec {
        &self.schema().fields[self.focused]
    }

    /// Raw text of the field at `index`.
    #[must_use]
    pub fn raw(&self, index: usize) -> &str {
        self.buffers.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.buffers.len();
    }

    pub fn focus_prev(&mut self) {
        if self.focused == 0 {
            self.focused = self.buffers.len() - 1;
        } else {
            self.focused -= 1;
        }
    }

    /// Append a character to the focused field.
    ///
    /// Numeric fields only take digits, `.` and `-`; anything else is ignored.
    pub fn input_char(&mut self, c: char) {
        let accepted = match self.focused_field().kind {
            FieldKind::Numeric => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Text => !c.is_control(),
        };
        if accepted {
            self.buffers[self.focused].push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.buffers[self.focused].pop();
    }

    pub fn clear_field(&mut self) {
        self.buffers[self.focused].zeroize();
    }

    /// Nudge the focused numeric field by `direction * DEFAULT_STEP`.
    pub fn step(&mut self, direction: i8) {
        if self.focused_field().kind != FieldKind::Numeric {
            return;
        }
        let next = self.value_at(self.focused) + f64::from(direction.signum()) * DEFAULT_STEP;
        self.buffers[self.focused] = format_number(next);
    }

    /// Overwrite the field `key`. Returns false when the key is not in the schema.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match self.schema().position(key) {
            Some(i) => {
                self.buffers[i] = format_number(value);
                true
            }
            None => false,
        }
    }

    /// Coerced value of `key`, or `None` if the key is not in the schema.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.schema().position(key).map(|i| self.value_at(i))
    }

    /// Coerced value of the field at `index`.
    #[must_use]
    pub fn value_at(&self, index: usize) -> f64 {
        coerce(self.raw(index))
    }

    /// Current key -> value mapping.
    #[must_use]
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        self.schema()
            .keys()
            .enumerate()
            .map(|(i, key)| (key, self.value_at(i)))
            .collect()
    }

    /// Wipe all buffers and return focus to the first field.
    pub fn reset(&mut self) {
        for buffer in self.buffers.iter_mut() {
            buffer.zeroize();
        }
        self.focused = 0;
    }
}

fn coerce(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_VALUE)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut FormState, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_new_form_defaults_to_zero() {
        let form = FormState::new(Disease::HeartDisease);
        let values = form.values();
        assert_eq!(values.len(), 13);
        assert!(values.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut form = FormState::new(Disease::Diabetes);
        type_str(&mut form, "1a2.5x");
        assert_eq!(form.raw(0), "12.5");
        assert_eq!(form.value("Pregnancies"), Some(12.5));
    }

    #[test]
    fn test_unparseable_input_coerces_to_zero() {
        let mut form = FormState::new(Disease::Diabetes);
        type_str(&mut form, "1-2");
        assert_eq!(form.value("Pregnancies"), Some(0.0));
    }

    #[test]
    fn test_negative_values_pass_through() {
        let mut form = FormState::new(Disease::Diabetes);
        form.set("Age", -4.0);
        assert_eq!(form.value("Age"), Some(-4.0));
    }

    #[test]
    fn test_step_uses_default_increment() {
        let mut form = FormState::new(Disease::HypoThyroid);
        form.step(1);
        form.step(1);
        assert_eq!(form.raw(0), "2");
        form.step(-1);
        assert_eq!(form.value("age"), Some(1.0));
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = FormState::new(Disease::HypoThyroid);
        form.focus_prev();
        assert_eq!(form.focused(), 6);
        form.focus_next();
        assert_eq!(form.focused(), 0);
    }

    #[test]
    fn test_set_unknown_key_is_rejected() {
        let mut form = FormState::new(Disease::Diabetes);
        assert!(!form.set("thal", 1.0));
        assert_eq!(form.value("thal"), None);
    }

    #[test]
    fn test_reset_clears_values_and_focus() {
        let mut form = FormState::new(Disease::LungCancer);
        form.focus_next();
        type_str(&mut form, "63");
        form.reset();
        assert_eq!(form.focused(), 0);
        assert!(form.values().values().all(|v| *v == 0.0));
        assert_eq!(form.raw(1), "");
    }
}
