//! Submission value store
//!
//! Holds what a respondent has entered so far, keyed by resolved column
//! name. After `initialize` the key set is exactly the schema's column set,
//! and no operation adds or removes keys.

use formz_core::{SubmissionMap, SubmissionValue};

use crate::models::{ColumnMap, FormElement, FormElementType};

/// Column name → current value for one form being filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionValues {
    values: SubmissionMap,
}

impl SubmissionValues {
    /// Empty text for every column, empty list for checkbox columns
    pub fn initialize(elements: &[FormElement]) -> Self {
        let columns = ColumnMap::resolve(elements);
        let values = elements
            .iter()
            .zip(columns.columns())
            .map(|(element, column)| {
                let initial = match element.element_type {
                    FormElementType::Checkbox => SubmissionValue::MultiChoice(Vec::new()),
                    _ => SubmissionValue::Text(String::new()),
                };
                (column.to_string(), initial)
            })
            .collect();

        Self { values }
    }

    /// Current value of a column
    pub fn get(&self, name: &str) -> Option<&SubmissionValue> {
        self.values.get(name)
    }

    /// Column names in schema order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite the value of an existing column. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<SubmissionValue>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => {
                tracing::warn!(column = %name, "ignoring value for unknown column");
                false
            }
        }
    }

    /// Add or remove `option_value` from the list stored at `name`
    pub fn toggle_multi(&mut self, name: &str, option_value: &str, checked: bool) -> bool {
        let Some(slot) = self.values.get_mut(name) else {
            tracing::warn!(column = %name, "ignoring toggle for unknown column");
            return false;
        };

        let mut selected = match std::mem::take(slot) {
            SubmissionValue::MultiChoice(values) => values,
            _ => Vec::new(),
        };
        if checked {
            if !selected.iter().any(|v| v == option_value) {
                selected.push(option_value.to_string());
            }
        } else {
            selected.retain(|v| v != option_value);
        }
        *slot = SubmissionValue::MultiChoice(selected);
        true
    }

    /// The row to persist; values are already plain data
    pub fn serialize(&self) -> SubmissionMap {
        self.values.clone()
    }

    pub fn into_map(self) -> SubmissionMap {
        self.values
    }
}
