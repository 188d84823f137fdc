//! Models for form design
//!
//! Core data structures for representing a form's elements, their options
//! and validation hints, and the ordered schema that owns them.

mod column_name;
mod element_type;
mod factory;
mod form_element;
mod form_schema;
mod validation;

pub use column_name::{ColumnMap, PRIMARY_KEY_COLUMN, derive_column_name, option_value_for};
pub use element_type::FormElementType;
pub use factory::{ElementFactory, generate_element_id};
pub use form_element::{ElementValidation, FormElement, FormElementOption};
pub use form_schema::FormSchema;
pub use validation::ValidationError;
