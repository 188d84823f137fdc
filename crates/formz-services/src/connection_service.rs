//! Connection service
//!
//! CRUD over saved external database descriptors plus a reachability test
//! delegated to the `test-db-connection` procedure.

use std::sync::Arc;

use serde_json::{Value, json};

use formz_core::{DatabaseConnection, Filter, Row, RowStore};

use crate::error::{ServiceError, ServiceResult};

/// Table holding saved connections
pub const CONNECTIONS_TABLE: &str = "database_connections";

/// Remote procedure that tries to open a connection
pub const TEST_CONNECTION_PROCEDURE: &str = "test-db-connection";

/// Service for managing saved database connections
pub struct ConnectionService {
    store: Arc<dyn RowStore>,
}

impl ConnectionService {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// All saved connections, newest first
    #[tracing::instrument(skip(self))]
    pub async fn fetch_connections(&self) -> ServiceResult<Vec<DatabaseConnection>> {
        let rows = self
            .store
            .select(CONNECTIONS_TABLE, &Filter::all().order_desc("created_at"))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        rows.into_iter()
            .map(|row| serde_json::from_value(Value::Object(row)).map_err(ServiceError::from))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_connection(&self, id: &str) -> ServiceResult<Option<DatabaseConnection>> {
        let rows = self
            .store
            .select(CONNECTIONS_TABLE, &Filter::all().eq("id", id))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(Value::Object(row))?)),
            None => Ok(None),
        }
    }

    /// Save a new connection and return its id
    #[tracing::instrument(skip(self, connection), fields(name = %connection.name))]
    pub async fn save_connection(&self, connection: &DatabaseConnection) -> ServiceResult<String> {
        let stored = self
            .store
            .insert(CONNECTIONS_TABLE, connection_row(connection)?)
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        let id = stored
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ServiceError::InvalidData("store returned no connection id".into()))?;

        tracing::info!(connection_id = %id, target = %connection.summary(), "Connection saved");
        Ok(id)
    }

    #[tracing::instrument(skip(self, connection))]
    pub async fn update_connection(
        &self,
        id: &str,
        connection: &DatabaseConnection,
    ) -> ServiceResult<()> {
        self.store
            .update(CONNECTIONS_TABLE, id, connection_row(connection)?)
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        tracing::info!(connection_id = %id, "Connection updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_connection(&self, id: &str) -> ServiceResult<()> {
        self.store
            .remove(CONNECTIONS_TABLE, &Filter::all().eq("id", id))
            .await
            .map_err(|e| ServiceError::PersistenceFailed(e.to_string()))?;

        tracing::info!(connection_id = %id, "Connection deleted");
        Ok(())
    }

    /// Whether the external database accepts the connection.
    ///
    /// A failing procedure call reads as "not reachable", not as an error.
    #[tracing::instrument(skip(self, connection), fields(target = %connection.summary()))]
    pub async fn test_connection(&self, connection: &DatabaseConnection) -> bool {
        let args = json!({
            "connectionConfig": connection,
            "dbType": connection.dialect,
        });

        match self.store.invoke_procedure(TEST_CONNECTION_PROCEDURE, args).await {
            Ok(result) => result
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "connection test failed");
                false
            }
        }
    }
}

/// Persistable columns; `id` and `created_at` belong to the store
fn connection_row(connection: &DatabaseConnection) -> ServiceResult<Row> {
    match serde_json::to_value(connection)? {
        Value::Object(mut row) => {
            row.remove("id");
            row.remove("created_at");
            Ok(row)
        }
        other => Err(ServiceError::InvalidData(format!(
            "connection serialized to {} instead of an object",
            other
        ))),
    }
}
