//! Form element model

use serde::{Deserialize, Serialize};

use super::factory::generate_id;
use super::{FormElementType, derive_column_name, option_value_for};

/// One choice of a select, radio or checkbox element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElementOption {
    /// Stable once created
    pub id: String,
    pub label: String,
    /// Always `option_value_for(label)`
    pub value: String,
}

impl FormElementOption {
    /// Create an option whose value is derived from `label`
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            value: option_value_for(&label),
            label,
        }
    }

    /// Change the label and recompute the value
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.value = option_value_for(&self.label);
    }
}

/// Validation hints attached to an element.
///
/// `kind` only tags the semantic validator (email, phone, url, number);
/// nothing in this crate enforces it. `min`/`max` bound number, slider and
/// rating controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementValidation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ElementValidation {
    /// Validation carrying only a semantic tag
    pub fn tagged(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Builder: set numeric bounds
    pub fn bounded(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// One configurable form field
///
/// Serialized with camelCase keys, matching the documents stored by
/// existing forms (`columnName`, `selectedIcon`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    /// Opaque identifier, assigned at creation
    pub id: String,
    /// Fixed at creation; changing type means delete + recreate
    #[serde(rename = "type")]
    pub element_type: FormElementType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only for choice types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FormElementOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ElementValidation>,
    /// Explicit storage identifier; derived from `label` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    /// Present only for icon_select
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_icon: Option<String>,
}

impl FormElement {
    /// Create a bare element with no type-specific defaults.
    ///
    /// Most callers want `ElementFactory::create` instead.
    pub fn new(id: impl Into<String>, element_type: FormElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
            label: element_type.label().to_string(),
            required: false,
            placeholder: None,
            description: None,
            options: None,
            validation: None,
            column_name: None,
            icons: None,
            selected_icon: None,
        }
    }

    /// Storage identifier of this element on its own.
    ///
    /// Uses the explicit override when it is set and non-empty, else derives
    /// from the label. Schema-wide consumers use `ColumnMap`, which also
    /// resolves collisions between elements.
    pub fn column_name(&self) -> String {
        match self.column_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => derive_column_name(&self.label),
        }
    }

    /// Builder: set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder: mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Builder: set explicit column name
    pub fn with_column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: replace the options with one option per label
    pub fn with_options<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(Vec::new());
        for label in labels {
            self.add_option(label);
        }
        self
    }

    /// Builder: set validation bounds
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        let validation = self.validation.take().unwrap_or_default();
        self.validation = Some(validation.bounded(min, max));
        self
    }

    /// Options of a choice element, empty for every other type
    pub fn options(&self) -> &[FormElementOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Icons of an icon_select element, empty for every other type
    pub fn icons(&self) -> &[String] {
        self.icons.as_deref().unwrap_or(&[])
    }

    /// Lower bound from validation
    pub fn min(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.min)
    }

    /// Upper bound from validation
    pub fn max(&self) -> Option<f64> {
        self.validation.as_ref().and_then(|v| v.max)
    }

    /// Append an option. Blank labels are ignored.
    pub fn add_option(&mut self, label: impl Into<String>) -> Option<&FormElementOption> {
        let label = label.into();
        if label.trim().is_empty() {
            return None;
        }

        let options = self.options.get_or_insert_with(Vec::new);
        let mut id = generate_id("option");
        while options.iter().any(|o| o.id == id) {
            id = generate_id("option");
        }
        options.push(FormElementOption::new(id, label));
        options.last()
    }

    /// Rename an option, recomputing its value. Returns false if no option has `option_id`.
    pub fn rename_option(&mut self, option_id: &str, label: impl Into<String>) -> bool {
        match self
            .options
            .as_mut()
            .and_then(|options| options.iter_mut().find(|o| o.id == option_id))
        {
            Some(option) => {
                option.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Remove an option by id
    pub fn remove_option(&mut self, option_id: &str) {
        if let Some(options) = self.options.as_mut() {
            options.retain(|o| o.id != option_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_name_falls_back_to_label() {
        let element = ElementFactory::create(FormElementType::Text).with_label("Full Name");
        assert_eq!(element.column_name(), "full_name");

        let element = element.with_column_name("");
        assert_eq!(element.column_name(), "full_name");

        let element = element.with_column_name("legal_name");
        assert_eq!(element.column_name(), "legal_name");
    }

    #[test]
    fn test_rename_option_recomputes_value() {
        let mut element = ElementFactory::create(FormElementType::Select);
        let first = element.options()[0].id.clone();

        assert!(element.rename_option(&first, "Yes Please"));
        assert_eq!(element.options()[0].value, "yes_please");
        assert_eq!(element.options()[0].id, first);
        assert!(!element.rename_option("missing", "x"));
    }

    #[test]
    fn test_add_and_remove_option() {
        let mut element = ElementFactory::create(FormElementType::Radio);
        assert!(element.add_option("   ").is_none());

        let id = element
            .add_option("Maybe Later")
            .map(|o| o.id.clone())
            .expect("option added");
        assert_eq!(element.options().len(), 4);
        assert_eq!(element.options()[3].value, "maybe_later");

        element.remove_option(&id);
        assert_eq!(element.options().len(), 3);
    }

    #[test]
    fn test_deserializes_legacy_document() {
        let json = r#"{
            "id": "element_1700000000000_42",
            "type": "checkbox",
            "label": "Favourite fruits",
            "required": true,
            "options": [
                {"id": "o1", "label": "Apple", "value": "apple"},
                {"id": "o2", "label": "Blood Orange", "value": "blood_orange"}
            ]
        }"#;

        let element: FormElement = serde_json::from_str(json).expect("parse element");
        assert_eq!(element.element_type, FormElementType::Checkbox);
        assert_eq!(element.column_name, None);
        assert_eq!(element.column_name(), "favourite_fruits");
        assert_eq!(element.options().len(), 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let element = ElementFactory::create(FormElementType::IconSelect)
            .with_label("Mood")
            .with_column_name("mood");
        let json = serde_json::to_value(&element).expect("serialize element");

        assert_eq!(json["type"], "icon_select");
        assert_eq!(json["columnName"], "mood");
        assert_eq!(json["selectedIcon"], "");
        assert!(json.get("options").is_none());
    }
}
