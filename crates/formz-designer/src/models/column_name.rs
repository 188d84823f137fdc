//! Column name derivation
//!
//! The single place where a storage identifier is computed from a label.
//! Schema save, DDL generation, the submission store, the responses table
//! and CSV export all go through [`ColumnMap`] (or, for one element,
//! [`FormElement::column_name`]), which in turn calls [`derive_column_name`].

use std::collections::HashSet;

use super::FormElement;

/// Identity column every generated table starts with; never handed to an element
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// Derive a storage-safe identifier from a label.
///
/// Lowercase, replace every character outside `[a-z0-9]` with `_`, collapse
/// runs of `_`, trim leading and trailing `_`. Total over any input; an
/// empty or all-punctuation label derives to the empty string.
pub fn derive_column_name(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_underscore = false;

    for ch in label.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_underscore && !out.is_empty() {
                out.push('_');
            }
            pending_underscore = false;
            out.push(ch);
        } else {
            pending_underscore = true;
        }
    }

    out
}

/// Value of a choice option: lowercase label with whitespace runs replaced by `_`
pub fn option_value_for(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolved element id → column name mapping for one schema, in schema order.
///
/// Elements whose names collide are disambiguated in schema order: the first
/// keeps its name, later ones get `_2`, `_3`, ... (skipping names already in
/// use). [`PRIMARY_KEY_COLUMN`] counts as taken from the start, so an element
/// labelled "ID" resolves to `id_2`. Empty names are kept as-is so that
/// validation can reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    entries: Vec<(String, String)>,
}

impl ColumnMap {
    /// Resolve the column names of `elements`
    pub fn resolve(elements: &[FormElement]) -> Self {
        let mut taken: HashSet<String> = HashSet::with_capacity(elements.len() + 1);
        taken.insert(PRIMARY_KEY_COLUMN.to_string());
        let mut entries = Vec::with_capacity(elements.len());

        for element in elements {
            let base = element.column_name();
            let column = if base.is_empty() || !taken.contains(&base) {
                base
            } else {
                let mut suffix = 2;
                loop {
                    let candidate = format!("{}_{}", base, suffix);
                    if !taken.contains(&candidate) {
                        tracing::debug!(
                            element_id = %element.id,
                            column = %candidate,
                            "disambiguated colliding column name"
                        );
                        break candidate;
                    }
                    suffix += 1;
                }
            };

            if !column.is_empty() {
                taken.insert(column.clone());
            }
            entries.push((element.id.clone(), column));
        }

        Self { entries }
    }

    /// Column of the element with `element_id`
    pub fn column_for(&self, element_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == element_id)
            .map(|(_, column)| column.as_str())
    }

    /// Column names in schema order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, column)| column.as_str())
    }

    /// `(element id, column name)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, column)| (id.as_str(), column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementFactory, FormElementType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_examples() {
        assert_eq!(derive_column_name("Full Name"), "full_name");
        assert_eq!(derive_column_name("E-mail!! Address"), "e_mail_address");
        assert_eq!(derive_column_name("  "), "");
        assert_eq!(derive_column_name(""), "");
        assert_eq!(derive_column_name("__Age__"), "age");
        assert_eq!(derive_column_name("Prénom de l'élève"), "pr_nom_de_l_l_ve");
        assert_eq!(derive_column_name("Q3 2024"), "q3_2024");
    }

    #[test]
    fn test_derive_is_idempotent() {
        let labels = [
            "Full Name",
            "E-mail!! Address",
            "Prénom",
            "a__b",
            "___",
            "Déjà vu?",
            "x1 y2 z3",
        ];
        for label in labels {
            let once = derive_column_name(label);
            assert_eq!(derive_column_name(&once), once, "label {label:?}");
        }
    }

    #[test]
    fn test_option_value_for() {
        assert_eq!(option_value_for("Option 1"), "option_1");
        assert_eq!(option_value_for("Yes  Please"), "yes_please");
        assert_eq!(option_value_for("Oui, merci"), "oui,_merci");
    }

    #[test]
    fn test_column_map_disambiguates_collisions() {
        let elements = vec![
            ElementFactory::create(FormElementType::Text).with_label("Name"),
            ElementFactory::create(FormElementType::Text).with_label("name!"),
            ElementFactory::create(FormElementType::Text).with_label("Name 2"),
            ElementFactory::create(FormElementType::Text).with_label("NAME"),
        ];

        let map = ColumnMap::resolve(&elements);
        let columns: Vec<_> = map.columns().collect();

        assert_eq!(columns, vec!["name", "name_2", "name_2_2", "name_3"]);
        assert_eq!(map.column_for(&elements[1].id), Some("name_2"));
    }

    #[test]
    fn test_column_map_prefers_override() {
        let elements = vec![
            ElementFactory::create(FormElementType::Email)
                .with_label("Contact")
                .with_column_name("contact_email"),
        ];

        let map = ColumnMap::resolve(&elements);
        assert_eq!(map.columns().collect::<Vec<_>>(), vec!["contact_email"]);
    }

    #[test]
    fn test_column_map_reserves_primary_key() {
        let elements = vec![
            ElementFactory::create(FormElementType::Text).with_label("ID"),
            ElementFactory::create(FormElementType::Number).with_label("Id"),
            ElementFactory::create(FormElementType::Text)
                .with_label("Order")
                .with_column_name("id"),
        ];

        let map = ColumnMap::resolve(&elements);
        assert_eq!(
            map.columns().collect::<Vec<_>>(),
            vec!["id_2", "id_3", "id_4"]
        );
    }

    #[test]
    fn test_column_map_keeps_empty_names() {
        let elements = vec![
            ElementFactory::create(FormElementType::Text).with_label("?"),
            ElementFactory::create(FormElementType::Text).with_label("!"),
        ];

        let map = ColumnMap::resolve(&elements);
        assert_eq!(map.columns().collect::<Vec<_>>(), vec!["", ""]);
    }
}
