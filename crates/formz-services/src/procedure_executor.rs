//! SQL executor backed by a row-store procedure
//!
//! The store's `execute-sql` procedure opens the connection and runs the
//! statement on our behalf, answering `{success, error?}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use formz_core::{DatabaseConnection, ExecutionOutcome, Result, RowStore, SqlDialect, SqlExecutor};

/// Remote procedure that runs SQL on an external database
pub const EXECUTE_SQL_PROCEDURE: &str = "execute-sql";

pub struct ProcedureSqlExecutor {
    store: Arc<dyn RowStore>,
}

impl ProcedureSqlExecutor {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SqlExecutor for ProcedureSqlExecutor {
    async fn execute(
        &self,
        connection: &DatabaseConnection,
        dialect: SqlDialect,
        sql: &str,
    ) -> Result<ExecutionOutcome> {
        let args = json!({
            "connectionConfig": connection,
            "dbType": dialect,
            "sql": sql,
        });

        // A failed call is reported as a failed execution, not raised
        match self.store.invoke_procedure(EXECUTE_SQL_PROCEDURE, args).await {
            Ok(serde_json::Value::Null) => Ok(ExecutionOutcome::failed("empty response")),
            Ok(value) => Ok(serde_json::from_value(value)?),
            Err(e) => {
                tracing::error!(error = %e, "execute-sql procedure failed");
                Ok(ExecutionOutcome::failed(e.to_string()))
            }
        }
    }
}
