//! Events delivered to the form builder
//!
//! The UI host translates clicks, drops and edits into these events and
//! feeds them to `FormSchema::apply` in the order they were dispatched.

use crate::models::{FormElement, FormElementType};

/// Discrete builder interactions
#[derive(Debug, Clone, PartialEq)]
pub enum FormBuilderEvent {
    /// A palette entry was dropped on the canvas
    ElementDropped(FormElementType),

    /// An element was dragged from one index to another
    ElementReordered { from: usize, to: usize },

    /// The configuration panel changed an element
    ElementUpdated(FormElement),

    /// The user deleted an element
    ElementDeleted(String),

    /// The user selected an element (or clicked the empty canvas)
    ElementSelected(Option<String>),

    TitleChanged(String),

    DescriptionChanged(String),
}
