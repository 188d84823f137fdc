//! Control descriptors and the events they accept

use formz_core::SubmissionValue;

use crate::submission::SubmissionValues;

/// HTML-ish input flavour of a single-line text control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Phone,
    Url,
}

/// How a single-choice element is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    Dropdown,
    RadioGroup,
}

/// One entry of a choice control
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceItem {
    pub option_id: String,
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// One entry of an icon picker
#[derive(Debug, Clone, PartialEq)]
pub struct IconItem {
    pub icon: String,
    pub selected: bool,
}

/// The interactive shape an element is rendered as
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    TextInput {
        kind: InputKind,
        placeholder: Option<String>,
        value: String,
    },
    TextArea {
        placeholder: Option<String>,
        value: String,
    },
    NumberInput {
        placeholder: Option<String>,
        min: Option<f64>,
        max: Option<f64>,
        value: String,
    },
    DateInput {
        value: String,
    },
    TimeInput {
        value: String,
    },
    SingleChoice {
        style: ChoiceStyle,
        items: Vec<ChoiceItem>,
    },
    MultiChoice {
        items: Vec<ChoiceItem>,
    },
    Slider {
        min: f64,
        max: f64,
        value: f64,
    },
    Toggle {
        on: bool,
    },
    /// Discrete steps `1..=max`; `value` 0 means nothing picked yet
    Rating {
        max: u32,
        value: u32,
    },
    IconChoice {
        items: Vec<IconItem>,
    },
}

/// User interaction with a rendered control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Free text typed into an input, textarea, date or time control
    Input(String),
    /// Option picked in a dropdown or radio group
    Choose(String),
    /// Checkbox of one option changed
    OptionToggled { value: String, checked: bool },
    SliderMoved(f64),
    Switched(bool),
    /// N-th rating step clicked (1-based)
    StepClicked(u32),
    IconPicked(String),
}

/// A control together with the chrome around it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedControl {
    pub element_id: String,
    /// Submission key the control reads from and writes to
    pub column: String,
    pub label: String,
    pub required: bool,
    pub description: Option<String>,
    pub control: Control,
    /// False for the design-time preview
    pub interactive: bool,
    /// True for the design-time preview
    pub drag_handle: bool,
}

impl RenderedControl {
    /// Route an interaction into the value store.
    ///
    /// Returns false when the event does not fit this control (or the
    /// control is a non-interactive preview); nothing is written then.
    pub fn handle(&self, event: ControlEvent, values: &mut SubmissionValues) -> bool {
        if !self.interactive {
            return false;
        }

        match (&self.control, event) {
            (
                Control::TextInput { .. }
                | Control::TextArea { .. }
                | Control::NumberInput { .. }
                | Control::DateInput { .. }
                | Control::TimeInput { .. },
                ControlEvent::Input(text),
            ) => values.set(&self.column, text),
            (Control::SingleChoice { items, .. }, ControlEvent::Choose(value)) => {
                if items.iter().any(|item| item.value == value) {
                    values.set(&self.column, value)
                } else {
                    false
                }
            }
            (Control::MultiChoice { items }, ControlEvent::OptionToggled { value, checked }) => {
                if items.iter().any(|item| item.value == value) {
                    values.toggle_multi(&self.column, &value, checked)
                } else {
                    false
                }
            }
            (Control::Slider { min, max, .. }, ControlEvent::SliderMoved(position)) => {
                values.set(&self.column, position.clamp(*min, *max))
            }
            (Control::Toggle { .. }, ControlEvent::Switched(on)) => values.set(&self.column, on),
            (Control::Rating { max, .. }, ControlEvent::StepClicked(step)) => {
                if (1..=*max).contains(&step) {
                    values.set(&self.column, SubmissionValue::Number(f64::from(step)))
                } else {
                    false
                }
            }
            (Control::IconChoice { items }, ControlEvent::IconPicked(icon)) => {
                if items.iter().any(|item| item.icon == icon) {
                    values.set(&self.column, icon)
                } else {
                    false
                }
            }
            (_, event) => {
                tracing::debug!(column = %self.column, ?event, "event does not apply to control");
                false
            }
        }
    }
}
