//! External database form service
//!
//! Publishes a form whose responses live in the user's own database:
//! the `CREATE TABLE` runs there first, and the form definition is saved
//! only once the table exists. Later schema edits are pushed with the
//! non-destructive `ALTER TABLE` script.

use std::sync::Arc;

use formz_core::{DatabaseConnection, SqlExecutor};
use formz_designer::DdlGenerator;

use crate::error::{ServiceError, ServiceResult};
use crate::form_service::FormService;
use crate::view_models::{FormData, FormDraft};

/// Service for forms backed by an external database table
pub struct ExternalFormService {
    forms: Arc<FormService>,
    executor: Arc<dyn SqlExecutor>,
}

impl ExternalFormService {
    pub fn new(forms: Arc<FormService>, executor: Arc<dyn SqlExecutor>) -> Self {
        Self { forms, executor }
    }

    /// Create `table_name` on `connection` and save the form.
    ///
    /// Nothing is saved when validation fails or the remote execution does.
    #[tracing::instrument(skip(self, draft, connection), fields(title = %draft.title))]
    pub async fn create_external_form(
        &self,
        draft: &FormDraft,
        table_name: &str,
        connection: Option<&DatabaseConnection>,
    ) -> ServiceResult<FormData> {
        if draft.title.trim().is_empty() {
            return Err(ServiceError::ValidationFailed(
                "The form title is required".to_string(),
            ));
        }
        if draft.elements.is_empty() {
            return Err(ServiceError::ValidationFailed(
                "The form must contain at least one element".to_string(),
            ));
        }
        if table_name.trim().is_empty() {
            return Err(ServiceError::ValidationFailed(
                "The table name is required".to_string(),
            ));
        }
        let connection = connection.ok_or_else(|| {
            ServiceError::ValidationFailed("A database connection is required".to_string())
        })?;

        let errors = self.forms.validate(draft);
        if !errors.is_empty() {
            return Err(ServiceError::from_validation(&errors));
        }

        let ddl = DdlGenerator::generate_create_table(table_name, &draft.elements, connection.dialect);
        tracing::debug!("Executing CREATE TABLE DDL:\n{}", ddl);
        self.run(connection, &ddl).await?;

        let form = self
            .forms
            .save_form(&draft.clone().with_table_name(table_name))
            .await?;

        tracing::info!(
            table_name = %table_name,
            target = %connection.summary(),
            "Form and external table created successfully"
        );
        Ok(form)
    }

    /// Bring the external table in line with the form's current schema.
    ///
    /// Adds missing columns and retypes existing ones; columns of deleted
    /// elements stay. Returns the statements that were executed.
    #[tracing::instrument(skip(self, form, connection, existing_columns), fields(table_name = %form.table_name))]
    pub async fn sync_table(
        &self,
        form: &FormData,
        connection: &DatabaseConnection,
        existing_columns: &[String],
    ) -> ServiceResult<Vec<String>> {
        let statements = DdlGenerator::generate_alter_table(
            &form.table_name,
            &form.schema,
            existing_columns,
            connection.dialect,
        );
        if statements.is_empty() {
            return Ok(statements);
        }

        let script = statements.join("\n");
        tracing::debug!("Executing ALTER DDL:\n{}", script);
        self.run(connection, &script).await?;

        tracing::info!(
            table_name = %form.table_name,
            statement_count = statements.len(),
            "External table altered successfully"
        );
        Ok(statements)
    }

    async fn run(&self, connection: &DatabaseConnection, sql: &str) -> ServiceResult<()> {
        let outcome = self
            .executor
            .execute(connection, connection.dialect, sql)
            .await
            .map_err(|e| ServiceError::ExecutionFailed(e.to_string()))?;

        if outcome.success {
            Ok(())
        } else {
            let error = outcome.error.unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(error = %error, target = %connection.summary(), "remote SQL execution failed");
            Err(ServiceError::ExecutionFailed(error))
        }
    }
}
