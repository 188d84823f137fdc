use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formz_core::Row;
use formz_designer::{FormElement, FormSchema};

use crate::error::{ServiceError, ServiceResult};

/// A stored form as read from the `forms` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Elements with their column names already resolved
    #[serde(default)]
    pub schema: Vec<FormElement>,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FormData {
    pub fn from_row(row: Row) -> ServiceResult<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(row))?)
    }

    /// Persistable columns; `id` and `created_at` belong to the store
    pub fn to_row(&self) -> ServiceResult<Row> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(mut row) => {
                row.remove("id");
                row.remove("created_at");
                Ok(row)
            }
            other => Err(ServiceError::InvalidData(format!(
                "form serialized to {} instead of an object",
                other
            ))),
        }
    }

    /// Rebuild the editable schema model
    pub fn to_schema(&self) -> FormSchema {
        FormSchema::from_elements(&self.title, &self.description, self.schema.clone())
    }
}

/// What the builder hands to `FormService::save_form`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    /// Set when editing an already saved form
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub elements: Vec<FormElement>,
    /// Generated from the title when absent
    pub table_name: Option<String>,
}

impl FormDraft {
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            id: None,
            title: schema.title.clone(),
            description: schema.description.clone(),
            elements: schema.elements().to_vec(),
            table_name: None,
        }
    }

    /// Draft for re-saving a stored form, keeping its id and table
    pub fn from_form(form: &FormData) -> Self {
        Self {
            id: form.id.clone(),
            title: form.title.clone(),
            description: form.description.clone(),
            elements: form.schema.clone(),
            table_name: Some(form.table_name.clone()).filter(|t| !t.is_empty()),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn to_schema(&self) -> FormSchema {
        FormSchema::from_elements(&self.title, &self.description, self.elements.clone())
    }
}
