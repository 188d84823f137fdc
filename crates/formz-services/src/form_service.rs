//! Form persistence service
//!
//! Saves builder drafts into the `forms` table, flips their published flag,
//! lists them and deletes them together with their submissions.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use formz_core::{Filter, RowStore};
use formz_designer::{ValidationError, derive_column_name};

use crate::busy::BusyFlag;
use crate::error::{ServiceError, ServiceResult};
use crate::submission_service::DATA_TABLE;
use crate::view_models::{FormData, FormDraft};

/// Table holding one row per form
pub const FORMS_TABLE: &str = "forms";

/// `form_<slug of title>_<last 6 digits of epoch millis>`
pub fn generate_table_name(title: &str, epoch_millis: i64) -> String {
    let millis = epoch_millis.to_string();
    let suffix = &millis[millis.len().saturating_sub(6)..];
    format!("form_{}_{}", derive_column_name(title), suffix)
}

/// Service for form definitions
///
/// Handles:
/// - Validating and saving drafts (one save at a time)
/// - Publishing / unpublishing
/// - Listing, loading and deleting forms
pub struct FormService {
    store: Arc<dyn RowStore>,
    saving: BusyFlag,
}

impl FormService {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            store,
            saving: BusyFlag::new(),
        }
    }

    /// Whether a save is in flight
    pub fn is_saving(&self) -> bool {
        self.saving.is_busy()
    }

    /// Validate a draft without saving it
    pub fn validate(&self, draft: &FormDraft) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if draft.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "The form title is required"));
        }
        errors.extend(draft.to_schema().validate());
        errors
    }

    /// Save a draft.
    ///
    /// New drafts are inserted unpublished under a generated table name;
    /// drafts carrying an id update that form in place. Column names are
    /// resolved and written into every element before anything is stored.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn save_form(&self, draft: &FormDraft) -> ServiceResult<FormData> {
        let _guard = self.saving.try_acquire().ok_or_else(|| {
            tracing::warn!("save refused, another save is in progress");
            ServiceError::SaveInProgress
        })?;

        let errors = self.validate(draft);
        if !errors.is_empty() {
            return Err(ServiceError::from_validation(&errors));
        }

        let table_name = draft
            .table_name
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| generate_table_name(&draft.title, Utc::now().timestamp_millis()));

        let mut form = FormData {
            id: draft.id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            schema: draft.to_schema().elements_with_column_names(),
            table_name,
            published: false,
            created_at: None,
        };

        match draft.id.as_deref() {
            Some(id) => {
                let mut patch = form.to_row()?;
                // Re-saving never changes the published state
                patch.remove("published");
                self.store
                    .update(FORMS_TABLE, id, patch)
                    .await
                    .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

                match self.fetch_form(id).await? {
                    Some(stored) => form = stored,
                    None => return Err(ServiceError::FormNotFound(id.to_string())),
                }
                tracing::info!(form_id = %id, "Form updated successfully");
            }
            None => {
                let stored = self
                    .store
                    .insert(FORMS_TABLE, form.to_row()?)
                    .await
                    .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;
                form = FormData::from_row(stored)?;
                tracing::info!(
                    form_id = form.id.as_deref().unwrap_or_default(),
                    table_name = %form.table_name,
                    "Form saved successfully"
                );
            }
        }

        Ok(form)
    }

    #[tracing::instrument(skip(self))]
    pub async fn publish_form(&self, form_id: &str) -> ServiceResult<()> {
        self.set_published(form_id, true).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn unpublish_form(&self, form_id: &str) -> ServiceResult<()> {
        self.set_published(form_id, false).await
    }

    async fn set_published(&self, form_id: &str, published: bool) -> ServiceResult<()> {
        let mut patch = formz_core::Row::new();
        patch.insert("published".to_string(), json!(published));

        self.store
            .update(FORMS_TABLE, form_id, patch)
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        tracing::info!(form_id = %form_id, published, "Form publication changed");
        Ok(())
    }

    /// All forms, newest first. Rows that no longer parse are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_forms(&self) -> ServiceResult<Vec<FormData>> {
        let rows = self
            .store
            .select(FORMS_TABLE, &Filter::all().order_desc("created_at"))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        let forms = rows
            .into_iter()
            .filter_map(|row| match FormData::from_row(row) {
                Ok(form) => Some(form),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable form row");
                    None
                }
            })
            .collect();
        Ok(forms)
    }

    /// One form, or `None` if it does not exist
    #[tracing::instrument(skip(self))]
    pub async fn fetch_form(&self, form_id: &str) -> ServiceResult<Option<FormData>> {
        let rows = self
            .store
            .select(FORMS_TABLE, &Filter::all().eq("id", form_id))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        rows.into_iter().next().map(FormData::from_row).transpose()
    }

    /// Delete a form and every submission made to it
    #[tracing::instrument(skip(self))]
    pub async fn delete_form(&self, form_id: &str) -> ServiceResult<()> {
        self.store
            .remove(DATA_TABLE, &Filter::all().eq("form_id", form_id))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;
        self.store
            .remove(FORMS_TABLE, &Filter::all().eq("id", form_id))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        tracing::info!(form_id = %form_id, "Form deleted successfully");
        Ok(())
    }
}
