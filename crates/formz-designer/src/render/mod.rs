//! Preview / render dispatcher
//!
//! Maps an element to the control a respondent interacts with. The
//! design-time preview is built by the same mapping, then disabled and
//! decorated with a drag handle, so the builder canvas shows exactly what
//! respondents will see.

mod control;

pub use control::{
    ChoiceItem, ChoiceStyle, Control, ControlEvent, IconItem, InputKind, RenderedControl,
};

use formz_core::SubmissionValue;

use crate::models::{ColumnMap, FormElement, FormElementType};
use crate::submission::SubmissionValues;

const DEFAULT_SLIDER_MIN: f64 = 0.0;
const DEFAULT_SLIDER_MAX: f64 = 100.0;
const DEFAULT_RATING_MAX: u32 = 5;

/// Render the live, interactive control of `element` showing `value`
pub fn render_control(
    element: &FormElement,
    column: &str,
    value: &SubmissionValue,
) -> RenderedControl {
    RenderedControl {
        element_id: element.id.clone(),
        column: column.to_string(),
        label: element.label.clone(),
        required: element.required,
        description: element.description.clone(),
        control: build_control(element, value),
        interactive: true,
        drag_handle: false,
    }
}

/// Render the disabled builder-canvas preview of `element` stored under `column`
pub fn render_preview(element: &FormElement, column: &str) -> RenderedControl {
    RenderedControl {
        interactive: false,
        drag_handle: true,
        ..render_control(element, column, &SubmissionValue::Null)
    }
}

/// Render the builder canvas, keyed by the same resolved columns as [`render_form`]
pub fn render_preview_form(elements: &[FormElement]) -> Vec<RenderedControl> {
    let columns = ColumnMap::resolve(elements);
    elements
        .iter()
        .zip(columns.columns())
        .map(|(element, column)| render_preview(element, column))
        .collect()
}

/// Render every element of a form against the current values, in schema order
pub fn render_form(elements: &[FormElement], values: &SubmissionValues) -> Vec<RenderedControl> {
    let columns = ColumnMap::resolve(elements);
    elements
        .iter()
        .zip(columns.columns())
        .map(|(element, column)| {
            let value = values.get(column).unwrap_or(&SubmissionValue::Null);
            render_control(element, column, value)
        })
        .collect()
}

fn text_of(value: &SubmissionValue) -> String {
    match value {
        SubmissionValue::Null => String::new(),
        other => other.to_cell(", "),
    }
}

fn build_control(element: &FormElement, value: &SubmissionValue) -> Control {
    let placeholder = element.placeholder.clone().filter(|p| !p.is_empty());

    match element.element_type {
        FormElementType::Text => text_input(InputKind::Text, placeholder, value),
        FormElementType::Email => text_input(InputKind::Email, placeholder, value),
        FormElementType::Phone => text_input(InputKind::Phone, placeholder, value),
        FormElementType::Url => text_input(InputKind::Url, placeholder, value),
        FormElementType::Textarea => Control::TextArea {
            placeholder,
            value: text_of(value),
        },
        FormElementType::Number => Control::NumberInput {
            placeholder,
            min: element.min(),
            max: element.max(),
            value: text_of(value),
        },
        FormElementType::Date => Control::DateInput {
            value: text_of(value),
        },
        FormElementType::Time => Control::TimeInput {
            value: text_of(value),
        },
        FormElementType::Select => single_choice(ChoiceStyle::Dropdown, element, value),
        FormElementType::Radio => single_choice(ChoiceStyle::RadioGroup, element, value),
        FormElementType::Checkbox => {
            let selected = value.as_list().unwrap_or(&[]);
            Control::MultiChoice {
                items: element
                    .options()
                    .iter()
                    .map(|option| ChoiceItem {
                        option_id: option.id.clone(),
                        label: option.label.clone(),
                        value: option.value.clone(),
                        selected: selected.contains(&option.value),
                    })
                    .collect(),
            }
        }
        FormElementType::Slider => {
            let min = element.min().unwrap_or(DEFAULT_SLIDER_MIN);
            let max = element.max().unwrap_or(DEFAULT_SLIDER_MAX).max(min);
            let value = value
                .as_f64()
                .map(|v| v.clamp(min, max))
                .unwrap_or(min);
            Control::Slider { min, max, value }
        }
        FormElementType::Toggle => Control::Toggle {
            on: value
                .as_bool()
                .or_else(|| value.as_str().map(|s| s == "true"))
                .unwrap_or(false),
        },
        FormElementType::Rating => {
            let max = element
                .max()
                .filter(|m| *m >= 1.0)
                .map(|m| m as u32)
                .unwrap_or(DEFAULT_RATING_MAX);
            let value = value
                .as_f64()
                .filter(|v| *v >= 1.0)
                .map(|v| (v.round() as u32).min(max))
                .unwrap_or(0);
            Control::Rating { max, value }
        }
        FormElementType::IconSelect => {
            let current = value.as_str().unwrap_or("");
            Control::IconChoice {
                items: element
                    .icons()
                    .iter()
                    .map(|icon| IconItem {
                        icon: icon.clone(),
                        selected: !current.is_empty() && icon == current,
                    })
                    .collect(),
            }
        }
    }
}

fn text_input(kind: InputKind, placeholder: Option<String>, value: &SubmissionValue) -> Control {
    Control::TextInput {
        kind,
        placeholder,
        value: text_of(value),
    }
}

fn single_choice(style: ChoiceStyle, element: &FormElement, value: &SubmissionValue) -> Control {
    let current = value.as_str().unwrap_or("");
    Control::SingleChoice {
        style,
        items: element
            .options()
            .iter()
            .map(|option| ChoiceItem {
                option_id: option.id.clone(),
                label: option.label.clone(),
                value: option.value.clone(),
                selected: !current.is_empty() && option.value == current,
            })
            .collect(),
    }
}
