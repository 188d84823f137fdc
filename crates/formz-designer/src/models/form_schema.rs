//! Form schema model

use serde::{Deserialize, Serialize};

use super::{ColumnMap, ElementFactory, FormElement, ValidationError};
use crate::events::FormBuilderEvent;

/// Ordered element list of one form plus its title, description and the
/// element currently selected in the builder.
///
/// Order is meaningful: it is the render order, the submission column
/// order, the CSV column order and the DDL column order. Nothing here
/// ever re-sorts the elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    pub description: String,
    elements: Vec<FormElement>,
    #[serde(skip)]
    selected: Option<String>,
}

impl FormSchema {
    /// Create an empty schema
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            elements: Vec::new(),
            selected: None,
        }
    }

    /// Create from stored elements (nothing selected)
    pub fn from_elements(
        title: impl Into<String>,
        description: impl Into<String>,
        elements: Vec<FormElement>,
    ) -> Self {
        Self {
            elements,
            ..Self::new(title, description)
        }
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<FormElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element with `id`
    pub fn get(&self, id: &str) -> Option<&FormElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Index of the element with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Append an element and select it
    pub fn add(&mut self, element: FormElement) {
        tracing::debug!(element_id = %element.id, element_type = %element.element_type, "adding element");
        self.selected = Some(element.id.clone());
        self.elements.push(element);
    }

    /// Replace the element with the same id.
    ///
    /// A missing id is a no-op: the update is lost, and callers get no
    /// signal for it.
    pub fn update(&mut self, element: FormElement) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(slot) => *slot = element,
            None => tracing::warn!(element_id = %element.id, "update for unknown element ignored"),
        }
    }

    /// Remove the element with `id`, clearing the selection if it was selected
    pub fn delete(&mut self, id: &str) {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.elements.len() == before {
            tracing::warn!(element_id = %id, "delete for unknown element ignored");
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    /// Remove the element at `from` and reinsert it at `to`.
    ///
    /// Out-of-range indexes are a no-op.
    pub fn move_element(&mut self, from: usize, to: usize) {
        if from >= self.elements.len() || to >= self.elements.len() {
            tracing::warn!(from, to, len = self.elements.len(), "move out of range ignored");
            return;
        }
        if from == to {
            return;
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
    }

    /// Select an element (or clear the selection). Unknown ids clear it.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.elements.iter().any(|e| e.id == *id))
            .map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&FormElement> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Apply one builder event, in dispatch order
    pub fn apply(&mut self, event: FormBuilderEvent) {
        match event {
            FormBuilderEvent::ElementDropped(element_type) => {
                self.add(ElementFactory::create(element_type));
            }
            FormBuilderEvent::ElementReordered { from, to } => self.move_element(from, to),
            FormBuilderEvent::ElementUpdated(element) => self.update(element),
            FormBuilderEvent::ElementDeleted(id) => self.delete(&id),
            FormBuilderEvent::ElementSelected(id) => self.select(id.as_deref()),
            FormBuilderEvent::TitleChanged(title) => self.title = title,
            FormBuilderEvent::DescriptionChanged(description) => self.description = description,
        }
    }

    /// Resolved column names of every element
    pub fn column_map(&self) -> ColumnMap {
        ColumnMap::resolve(&self.elements)
    }

    /// Elements with their resolved column names written into `column_name`,
    /// ready to be persisted.
    pub fn elements_with_column_names(&self) -> Vec<FormElement> {
        let columns = self.column_map();
        self.elements
            .iter()
            .zip(columns.columns())
            .map(|(element, column)| {
                let mut element = element.clone();
                element.column_name = Some(column.to_string());
                element
            })
            .collect()
    }

    /// Check whether the schema can be persisted
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.elements.is_empty() {
            errors.push(ValidationError::new(
                "elements",
                "The form is empty. Add elements before saving.",
            ));
        }

        let columns = self.column_map();
        for (i, (element, column)) in self.elements.iter().zip(columns.columns()).enumerate() {
            if column.is_empty() {
                errors.push(ValidationError::new(
                    format!("elements[{}].label", i),
                    format!(
                        "Field {} (\"{}\") needs a label containing letters or digits",
                        i + 1,
                        element.label
                    ),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormElementType;
    use pretty_assertions::assert_eq;

    fn labelled(label: &str) -> FormElement {
        ElementFactory::create(FormElementType::Text).with_label(label)
    }

    fn labels(schema: &FormSchema) -> Vec<&str> {
        schema.elements().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_add_selects_new_element() {
        let mut schema = FormSchema::new("Survey", "");
        let a = labelled("A");
        let id = a.id.clone();
        schema.add(a);

        assert_eq!(schema.selected_id(), Some(id.as_str()));
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_move_front_to_back() {
        let mut schema = FormSchema::new("Survey", "");
        for label in ["A", "B", "C"] {
            schema.add(labelled(label));
        }

        schema.move_element(0, 2);
        assert_eq!(labels(&schema), vec!["B", "C", "A"]);

        schema.move_element(2, 0);
        assert_eq!(labels(&schema), vec!["A", "B", "C"]);

        schema.move_element(1, 7);
        assert_eq!(labels(&schema), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut schema = FormSchema::new("Survey", "");
        schema.add(labelled("A"));
        let before = schema.clone();

        schema.update(labelled("Ghost"));
        assert_eq!(schema, before);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut schema = FormSchema::new("Survey", "");
        schema.add(labelled("A"));
        schema.add(labelled("B"));

        let mut edited = schema.elements()[0].clone();
        edited.label = "Renamed".into();
        edited.required = true;
        schema.update(edited);

        assert_eq!(labels(&schema), vec!["Renamed", "B"]);
        assert!(schema.elements()[0].required);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut schema = FormSchema::new("Survey", "");
        schema.add(labelled("A"));
        schema.add(labelled("B"));
        let a = schema.elements()[0].id.clone();
        let b = schema.elements()[1].id.clone();

        schema.delete(&a);
        assert_eq!(schema.selected_id(), Some(b.as_str()));

        schema.delete(&b);
        assert_eq!(schema.selected_id(), None);
        assert!(schema.is_empty());
    }

    #[test]
    fn test_apply_events_in_order() {
        let mut schema = FormSchema::new("Survey", "");
        schema.apply(FormBuilderEvent::ElementDropped(FormElementType::Email));
        schema.apply(FormBuilderEvent::ElementDropped(FormElementType::Rating));
        schema.apply(FormBuilderEvent::ElementReordered { from: 1, to: 0 });
        schema.apply(FormBuilderEvent::TitleChanged("Feedback".into()));

        let types: Vec<_> = schema.elements().iter().map(|e| e.element_type).collect();
        assert_eq!(types, vec![FormElementType::Rating, FormElementType::Email]);
        assert_eq!(schema.title, "Feedback");
        assert_eq!(
            schema.selected_element().map(|e| e.element_type),
            Some(FormElementType::Rating)
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_unnamed() {
        let schema = FormSchema::new("Survey", "");
        assert_eq!(schema.validate().len(), 1);

        let mut schema = FormSchema::new("Survey", "");
        schema.add(labelled("Name"));
        schema.add(labelled("???"));
        let errors = schema.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "elements[1].label");
    }

    #[test]
    fn test_elements_with_column_names_stamps_unique_names() {
        let mut schema = FormSchema::new("Survey", "");
        schema.add(labelled("Name"));
        schema.add(labelled("Name"));

        let stamped = schema.elements_with_column_names();
        let names: Vec<_> = stamped.iter().map(|e| e.column_name.clone()).collect();
        assert_eq!(names, vec![Some("name".into()), Some("name_2".into())]);

        let reloaded = FormSchema::from_elements("Survey", "", stamped);
        assert_eq!(reloaded.column_map(), schema.column_map());
    }
}
