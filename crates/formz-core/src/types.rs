//! Core types for formz

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value entered for one form field
///
/// Serialized untagged so stored submissions are plain JSON documents
/// (`{"name": "Ada", "tags": ["a", "b"], "age": 36, "agree": true}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SubmissionValue {
    /// Missing cell (only ever produced when reading stored rows)
    #[default]
    Null,
    /// Toggle
    Bool(bool),
    /// Slider, rating and numbers that were typed as numbers
    Number(f64),
    /// Every single-value control
    Text(String),
    /// Checkbox group: the selected option values in selection order
    MultiChoice(Vec<String>),
}

impl SubmissionValue {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, SubmissionValue::Null)
    }

    /// Empty text, empty list and NULL count as unanswered
    pub fn is_empty(&self) -> bool {
        match self {
            SubmissionValue::Null => true,
            SubmissionValue::Text(s) => s.is_empty(),
            SubmissionValue::MultiChoice(values) => values.is_empty(),
            SubmissionValue::Number(_) | SubmissionValue::Bool(_) => false,
        }
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SubmissionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SubmissionValue::Number(v) => Some(*v),
            SubmissionValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SubmissionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the selected options of a multi-choice value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SubmissionValue::MultiChoice(values) => Some(values),
            _ => None,
        }
    }

    /// Render the value as a single cell, joining lists with `separator`
    pub fn to_cell(&self, separator: &str) -> String {
        match self {
            SubmissionValue::Null => String::new(),
            SubmissionValue::Bool(v) => v.to_string(),
            SubmissionValue::Number(v) => v.to_string(),
            SubmissionValue::Text(s) => s.clone(),
            SubmissionValue::MultiChoice(values) => values.join(separator),
        }
    }
}

impl std::fmt::Display for SubmissionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_cell(", "))
    }
}

impl From<&str> for SubmissionValue {
    fn from(value: &str) -> Self {
        SubmissionValue::Text(value.to_string())
    }
}

impl From<String> for SubmissionValue {
    fn from(value: String) -> Self {
        SubmissionValue::Text(value)
    }
}

impl From<bool> for SubmissionValue {
    fn from(value: bool) -> Self {
        SubmissionValue::Bool(value)
    }
}

impl From<f64> for SubmissionValue {
    fn from(value: f64) -> Self {
        SubmissionValue::Number(value)
    }
}

impl From<Vec<String>> for SubmissionValue {
    fn from(values: Vec<String>) -> Self {
        SubmissionValue::MultiChoice(values)
    }
}

/// Column name → value, in schema order
pub type SubmissionMap = IndexMap<String, SubmissionValue>;

/// One stored submission as read back for the responses screen and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub values: SubmissionMap,
}

impl SubmissionRow {
    /// Look up a cell; absent columns read as NULL
    pub fn value(&self, column: &str) -> &SubmissionValue {
        static NULL: SubmissionValue = SubmissionValue::Null;
        self.values.get(column).unwrap_or(&NULL)
    }
}
