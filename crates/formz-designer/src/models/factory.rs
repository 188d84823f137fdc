//! Element factory
//!
//! Builds the element a user gets when dropping a palette entry on the canvas.

use chrono::Utc;
use rand::Rng;

use super::{ElementValidation, FormElement, FormElementOption, FormElementType};

const DEFAULT_PLACEHOLDER: &str = "Enter your text here";
const DEFAULT_DESCRIPTION: &str = "Field description";
const DEFAULT_ICONS: [&str; 5] = ["👍", "👎", "😀", "😢", "🚀"];

/// `<prefix>_<epoch millis>_<random 0..1000>`.
///
/// Unique enough within one form's lifetime; collisions are improbable,
/// not impossible.
pub(crate) fn generate_id(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Fresh element id
pub fn generate_element_id() -> String {
    generate_id("element")
}

/// Factory for new form elements
pub struct ElementFactory;

impl ElementFactory {
    /// Create a new element of `element_type` with type-specific defaults
    pub fn create(element_type: FormElementType) -> FormElement {
        let id = generate_element_id();
        let mut element = FormElement::new(id.clone(), element_type);
        element.placeholder = Some(DEFAULT_PLACEHOLDER.to_string());
        element.description = Some(DEFAULT_DESCRIPTION.to_string());

        match element_type {
            FormElementType::Select | FormElementType::Radio | FormElementType::Checkbox => {
                element.options = Some(
                    (1..=3)
                        .map(|n| {
                            FormElementOption::new(format!("option_{}_{}", n, id), format!("Option {}", n))
                        })
                        .collect(),
                );
            }
            FormElementType::Number => {
                element.validation = Some(ElementValidation::tagged("number"));
                element.placeholder = Some("Enter a number".to_string());
            }
            FormElementType::Email => {
                element.validation = Some(ElementValidation::tagged("email"));
                element.placeholder = Some("example@email.com".to_string());
            }
            FormElementType::Phone => {
                element.validation = Some(ElementValidation::tagged("phone"));
                element.placeholder = Some("+1 555 123 4567".to_string());
            }
            FormElementType::Url => {
                element.validation = Some(ElementValidation::tagged("url"));
                element.placeholder = Some("https://example.com".to_string());
            }
            FormElementType::Slider => {
                element.validation = Some(ElementValidation::tagged("number").bounded(0.0, 100.0));
                element.placeholder = None;
            }
            FormElementType::Rating => {
                element.validation = Some(ElementValidation::tagged("number").bounded(1.0, 5.0));
                element.placeholder = None;
            }
            FormElementType::IconSelect => {
                element.icons = Some(DEFAULT_ICONS.iter().map(|icon| icon.to_string()).collect());
                element.selected_icon = Some(String::new());
                element.placeholder = None;
            }
            FormElementType::Date | FormElementType::Time | FormElementType::Toggle => {
                element.placeholder = None;
            }
            FormElementType::Text | FormElementType::Textarea => {}
        }

        element
    }
}
