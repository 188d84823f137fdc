//! Submission service
//!
//! Every response of every form lives in the shared `data` table as
//! `{form_id, form_data}`, where `form_data` is the submission value map
//! keyed by resolved column name.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use formz_core::{Filter, Row, RowStore, SubmissionMap, SubmissionRow};
use formz_designer::SubmissionValues;

use crate::error::{ServiceError, ServiceResult};
use crate::view_models::FormData;

/// Table holding one row per submission
pub const DATA_TABLE: &str = "data";

/// Service for form responses
pub struct SubmissionService {
    store: Arc<dyn RowStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// Store one response. Only saved, published forms accept submissions.
    ///
    /// Returns the id the store assigned to the submission.
    #[tracing::instrument(skip(self, form, values), fields(form_id = ?form.id))]
    pub async fn submit(&self, form: &FormData, values: &SubmissionValues) -> ServiceResult<String> {
        let form_id = form.id.as_deref().ok_or(ServiceError::MissingFormId)?;
        if !form.published {
            return Err(ServiceError::NotPublished);
        }

        let mut row = Row::new();
        row.insert("form_id".to_string(), json!(form_id));
        row.insert("form_data".to_string(), serde_json::to_value(values.serialize())?);

        let stored = self
            .store
            .insert(DATA_TABLE, row)
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        let id = stored.get("id").map(id_string).unwrap_or_default();
        tracing::info!(form_id = %form_id, submission_id = %id, "Submission stored");
        Ok(id)
    }

    /// Responses to a form, newest first
    #[tracing::instrument(skip(self))]
    pub async fn list_responses(&self, form_id: &str) -> ServiceResult<Vec<SubmissionRow>> {
        let rows = self
            .store
            .select(
                DATA_TABLE,
                &Filter::all().eq("form_id", form_id).order_desc("created_at"),
            )
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        rows.into_iter().map(submission_row).collect()
    }
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn submission_row(mut row: Row) -> ServiceResult<SubmissionRow> {
    let id = row
        .get("id")
        .map(id_string)
        .ok_or_else(|| ServiceError::InvalidData("submission without id".to_string()))?;

    let created_at: DateTime<Utc> = match row.remove("created_at") {
        Some(value) => serde_json::from_value(value)?,
        None => {
            return Err(ServiceError::InvalidData(format!(
                "submission {} without created_at",
                id
            )));
        }
    };

    let values: SubmissionMap = match row.remove("form_data") {
        Some(Value::Null) | None => SubmissionMap::new(),
        Some(value) => serde_json::from_value(value)?,
    };

    Ok(SubmissionRow {
        id,
        created_at,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formz_core::SubmissionValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submission_row_flattens_form_data() {
        let row = json!({
            "id": 7,
            "form_id": "f1",
            "created_at": "2024-03-01T09:30:00+00:00",
            "form_data": {"name": "Ada", "topics": ["a"]}
        });
        let row = row.as_object().cloned().expect("object");

        let parsed = submission_row(row).expect("parse submission");
        assert_eq!(parsed.id, "7");
        assert_eq!(parsed.value("name"), &SubmissionValue::Text("Ada".into()));
        assert_eq!(
            parsed.value("topics"),
            &SubmissionValue::MultiChoice(vec!["a".into()])
        );
        assert_eq!(parsed.value("missing"), &SubmissionValue::Null);
    }

    #[test]
    fn test_submission_row_requires_timestamp() {
        let row = json!({"id": "s1", "form_data": {}});
        let row = row.as_object().cloned().expect("object");
        assert!(matches!(submission_row(row), Err(ServiceError::InvalidData(_))));
    }
}
