use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

/// A single answer stored in an `AnswerSet`.
///
/// Serializes to the plain JSON value the submission endpoint expects:
/// strings, numbers, booleans, arrays of strings and `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text (single or multi-line).
    Text(String),

    /// A whole number.
    Int(i64),

    /// A decimal number.
    Float(f64),

    /// A yes/no toggle.
    Bool(bool),

    /// The value of the selected option of a single-choice field.
    Choice(String),

    /// The values of all selected options of a multi-choice field.
    Choices(BTreeSet<String>),

    /// A calendar date.
    Date(NaiveDate),
}

impl AnswerValue {
    /// An empty multi-choice selection.
    pub fn empty_choices() -> Self {
        Self::Choices(BTreeSet::new())
    }

    /// Build a multi-choice selection from any list of option values.
    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(values.into_iter().map(Into::into).collect())
    }

    /// Whether this value counts as "not filled in".
    ///
    /// Numbers, booleans and dates are never blank once present.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Choice(s) => s.trim().is_empty(),
            Self::Choices(set) => set.is_empty(),
            Self::Int(_) | Self::Float(_) | Self::Bool(_) | Self::Date(_) => false,
        }
    }

    /// Try to get this value as a string reference (text or single choice).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a number, widening integers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as a set of chosen options.
    pub fn as_choices(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Choices(set) => Some(set),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::Choice(_) => "Choice",
            Self::Choices(_) => "Choices",
            Self::Date(_) => "Date",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AnswerValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AnswerValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for AnswerValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<BTreeSet<String>> for AnswerValue {
    fn from(set: BTreeSet<String>) -> Self {
        Self::Choices(set)
    }
}
