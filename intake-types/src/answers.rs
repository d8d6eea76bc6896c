use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{AnswerValue, FieldId};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for field: {0}")]
    Missing(FieldId),

    #[error("Type mismatch at field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The in-progress answers of one intake session.
///
/// Keys are field ids; a missing key means the field was never filled in.
/// Serializes as a flat JSON object, which is exactly the submission payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<FieldId, AnswerValue>,
}

impl AnswerSet {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert an answer for the given field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<FieldId>, value: impl Into<AnswerValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Get the answer for the given field.
    pub fn get(&self, field: &FieldId) -> Option<&AnswerValue> {
        self.values.get(field)
    }

    /// Check if an answer exists for the given field.
    pub fn contains(&self, field: &FieldId) -> bool {
        self.values.contains_key(field)
    }

    /// Remove the answer for the given field.
    pub fn remove(&mut self, field: &FieldId) -> Option<AnswerValue> {
        self.values.remove(field)
    }

    /// Get an iterator over all field-value pairs, ordered by field id.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if the field has an answer that is not blank.
    pub fn has_value(&self, field: &FieldId) -> bool {
        self.get(field).is_some_and(|v| !v.is_blank())
    }

    /// Check if the field holds `true`. Missing or non-bool answers count as `false`.
    pub fn is_true(&self, field: &FieldId) -> bool {
        matches!(self.get(field), Some(AnswerValue::Bool(true)))
    }

    /// Check if the multi-choice field includes the given option.
    pub fn includes(&self, field: &FieldId, option: &str) -> bool {
        match self.get(field) {
            Some(AnswerValue::Choices(set)) => set.contains(option),
            Some(AnswerValue::Choice(selected)) => selected == option,
            _ => false,
        }
    }

    // === Convenience accessors ===

    /// Get a text (or single choice) answer.
    pub fn get_text(&self, field: &FieldId) -> Result<&str, AnswerError> {
        match self.get(field) {
            Some(AnswerValue::Text(s) | AnswerValue::Choice(s)) => Ok(s),
            Some(other) => Err(mismatch(field, "Text", other)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }

    /// Get an integer answer.
    pub fn get_int(&self, field: &FieldId) -> Result<i64, AnswerError> {
        match self.get(field) {
            Some(AnswerValue::Int(i)) => Ok(*i),
            Some(other) => Err(mismatch(field, "Int", other)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }

    /// Get a numeric answer, widening integers.
    pub fn get_number(&self, field: &FieldId) -> Result<f64, AnswerError> {
        match self.get(field) {
            Some(value) => value
                .as_number()
                .ok_or_else(|| mismatch(field, "Float", value)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }

    /// Get a boolean answer.
    pub fn get_bool(&self, field: &FieldId) -> Result<bool, AnswerError> {
        match self.get(field) {
            Some(AnswerValue::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(field, "Bool", other)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }

    /// Get the selected options of a multi-choice answer.
    pub fn get_choices(&self, field: &FieldId) -> Result<&BTreeSet<String>, AnswerError> {
        match self.get(field) {
            Some(AnswerValue::Choices(set)) => Ok(set),
            Some(other) => Err(mismatch(field, "Choices", other)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }

    /// Get a date answer.
    pub fn get_date(&self, field: &FieldId) -> Result<NaiveDate, AnswerError> {
        match self.get(field) {
            Some(AnswerValue::Date(d)) => Ok(*d),
            Some(other) => Err(mismatch(field, "Date", other)),
            None => Err(AnswerError::Missing(field.clone())),
        }
    }
}

fn mismatch(field: &FieldId, expected: &'static str, actual: &AnswerValue) -> AnswerError {
    AnswerError::TypeMismatch {
        field: field.clone(),
        expected,
        actual: actual.type_name(),
    }
}

impl IntoIterator for AnswerSet {
    type Item = (FieldId, AnswerValue);
    type IntoIter = std::collections::btree_map::IntoIter<FieldId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a FieldId, &'a AnswerValue);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldId, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = AnswerSet::new();
        answers.insert("nombreCompleto", "Ana López");
        answers.insert("edad", 34);

        assert_eq!(
            answers.get_text(&FieldId::new("nombreCompleto")).unwrap(),
            "Ana López"
        );
        assert_eq!(answers.get_int(&FieldId::new("edad")).unwrap(), 34);
        assert_eq!(answers.get_number(&FieldId::new("edad")).unwrap(), 34.0);
    }

    #[test]
    fn type_mismatch_error() {
        let mut answers = AnswerSet::new();
        answers.insert("edad", 34);

        let result = answers.get_text(&FieldId::new("edad"));
        assert!(matches!(result, Err(AnswerError::TypeMismatch { .. })));
    }

    #[test]
    fn missing_error() {
        let answers = AnswerSet::new();
        let result = answers.get_bool(&FieldId::new("trabaja"));
        assert!(matches!(result, Err(AnswerError::Missing(_))));
    }

    #[test]
    fn has_value_ignores_blank() {
        let mut answers = AnswerSet::new();
        answers.insert("areaTrabajo", "  ");
        answers.insert("objetivos", AnswerValue::empty_choices());
        answers.insert("trabaja", false);

        assert!(!answers.has_value(&FieldId::new("areaTrabajo")));
        assert!(!answers.has_value(&FieldId::new("objetivos")));
        assert!(answers.has_value(&FieldId::new("trabaja")));
        assert!(!answers.has_value(&FieldId::new("missing")));
    }

    #[test]
    fn includes_and_is_true() {
        let mut answers = AnswerSet::new();
        answers.insert("objetivos", AnswerValue::choices(["Tonificar", "otro"]));
        answers.insert("trabaja", true);

        assert!(answers.includes(&FieldId::new("objetivos"), "otro"));
        assert!(!answers.includes(&FieldId::new("objetivos"), "Tonificar "));
        assert!(answers.is_true(&FieldId::new("trabaja")));
        assert!(!answers.is_true(&FieldId::new("objetivos")));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut answers = AnswerSet::new();
        answers.insert("nombreCompleto", "Ana");
        answers.insert("edad", 34);
        answers.insert("trabaja", false);

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"edad": 34, "nombreCompleto": "Ana", "trabaja": false})
        );
    }
}
