//! Element type registry
//!
//! Every lookup here is an exhaustive `match` without a wildcard arm, so a
//! new variant does not compile until it has a label, an icon and a SQL type.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum FormElementType {
    Text,
    Textarea,
    Email,
    Number,
    Select,
    Radio,
    Checkbox,
    Date,
    Phone,
    Url,
    Slider,
    Toggle,
    Time,
    Rating,
    IconSelect,
}

impl FormElementType {
    /// All element types in palette order
    pub fn all() -> impl Iterator<Item = FormElementType> {
        FormElementType::iter()
    }

    /// Identifier used in stored schemas
    pub fn id(&self) -> &'static str {
        match self {
            FormElementType::Text => "text",
            FormElementType::Textarea => "textarea",
            FormElementType::Email => "email",
            FormElementType::Number => "number",
            FormElementType::Select => "select",
            FormElementType::Radio => "radio",
            FormElementType::Checkbox => "checkbox",
            FormElementType::Date => "date",
            FormElementType::Phone => "phone",
            FormElementType::Url => "url",
            FormElementType::Slider => "slider",
            FormElementType::Toggle => "toggle",
            FormElementType::Time => "time",
            FormElementType::Rating => "rating",
            FormElementType::IconSelect => "icon_select",
        }
    }

    /// Parse a stored identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().find(|ty| ty.id() == id)
    }

    /// Display label, also the default label of new elements
    pub fn label(&self) -> &'static str {
        match self {
            FormElementType::Text => "Short text",
            FormElementType::Textarea => "Long text",
            FormElementType::Email => "Email",
            FormElementType::Number => "Number",
            FormElementType::Select => "Dropdown",
            FormElementType::Radio => "Radio buttons",
            FormElementType::Checkbox => "Checkboxes",
            FormElementType::Date => "Date",
            FormElementType::Phone => "Phone",
            FormElementType::Url => "URL",
            FormElementType::Slider => "Slider",
            FormElementType::Toggle => "Toggle",
            FormElementType::Time => "Time",
            FormElementType::Rating => "Rating",
            FormElementType::IconSelect => "Icon choice",
        }
    }

    /// One-line palette glyph
    pub fn icon(&self) -> &'static str {
        match self {
            FormElementType::Text => "Aa",
            FormElementType::Textarea => "Aaa",
            FormElementType::Email => "@",
            FormElementType::Number => "123",
            FormElementType::Select => "▾",
            FormElementType::Radio => "○",
            FormElementType::Checkbox => "☑",
            FormElementType::Date => "📅",
            FormElementType::Phone => "📞",
            FormElementType::Url => "🔗",
            FormElementType::Slider => "⟿",
            FormElementType::Toggle => "⚙️",
            FormElementType::Time => "🕒",
            FormElementType::Rating => "★",
            FormElementType::IconSelect => "🖼️",
        }
    }

    /// Column type shown in the builder's schema summary.
    ///
    /// Informational only: generated DDL uses `DdlGenerator::sql_type`.
    pub fn default_postgres_type(&self) -> &'static str {
        match self {
            FormElementType::Text => "VARCHAR(255)",
            FormElementType::Textarea => "TEXT",
            FormElementType::Email => "VARCHAR(255)",
            FormElementType::Number => "NUMERIC",
            FormElementType::Select => "VARCHAR(255)",
            FormElementType::Radio => "VARCHAR(255)",
            FormElementType::Checkbox => "BOOLEAN[]",
            FormElementType::Date => "DATE",
            FormElementType::Phone => "VARCHAR(20)",
            FormElementType::Url => "VARCHAR(255)",
            FormElementType::Slider => "NUMERIC",
            FormElementType::Toggle => "BOOLEAN",
            FormElementType::Time => "TIME",
            FormElementType::Rating => "INTEGER",
            FormElementType::IconSelect => "VARCHAR(255)",
        }
    }

    /// Whether the element carries an `options` list
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FormElementType::Select | FormElementType::Radio | FormElementType::Checkbox
        )
    }

    /// Whether a placeholder means anything for this control
    pub fn supports_placeholder(&self) -> bool {
        match self {
            FormElementType::Text
            | FormElementType::Textarea
            | FormElementType::Email
            | FormElementType::Number
            | FormElementType::Phone
            | FormElementType::Url => true,
            FormElementType::Select
            | FormElementType::Radio
            | FormElementType::Checkbox
            | FormElementType::Date
            | FormElementType::Slider
            | FormElementType::Toggle
            | FormElementType::Time
            | FormElementType::Rating
            | FormElementType::IconSelect => false,
        }
    }
}

impl std::fmt::Display for FormElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
