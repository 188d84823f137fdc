//! Common test utilities and mocks

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use formz_core::{
    DatabaseConnection, ExecutionOutcome, Filter, FormzError, Result, Row, RowStore,
    SortDirection, SqlDialect, SqlExecutor,
};

/// In-memory row store.
///
/// Assigns a UUID `id` and a strictly increasing `created_at` to every
/// inserted row, so "newest first" ordering is deterministic.
pub struct MockRowStore {
    pub should_fail: bool,
    pub delay: Option<Duration>,
    pub tables: Arc<parking_lot::Mutex<HashMap<String, Vec<Row>>>>,
    pub procedure_responses: Vec<(String, Value)>,
    /// `(procedure name, args)` of every procedure call
    pub procedure_log: Arc<parking_lot::Mutex<Vec<(String, Value)>>>,
    /// `"<op> <table>"` of every row operation
    pub op_log: Arc<parking_lot::Mutex<Vec<String>>>,
    inserted: Arc<parking_lot::Mutex<i64>>,
}

impl MockRowStore {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            delay: None,
            tables: Arc::new(parking_lot::Mutex::new(HashMap::new())),
            procedure_responses: vec![],
            procedure_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            op_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            inserted: Arc::new(parking_lot::Mutex::new(0)),
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Make every row operation take `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_procedure_response(mut self, name: impl Into<String>, response: Value) -> Self {
        self.procedure_responses.push((name.into(), response));
        self
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.lock().get(table).cloned().unwrap_or_default()
    }

    pub fn op_log(&self) -> Vec<String> {
        self.op_log.lock().clone()
    }

    pub fn procedure_log(&self) -> Vec<(String, Value)> {
        self.procedure_log.lock().clone()
    }

    async fn enter(&self, op: &str, table: &str) -> Result<()> {
        self.op_log.lock().push(format!("{} {}", op, table));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err(FormzError::Persistence(format!("{} on {} failed", op, table)));
        }
        Ok(())
    }
}

#[async_trait]
impl RowStore for MockRowStore {
    async fn insert(&self, table: &str, mut row: Row) -> Result<Row> {
        self.enter("insert", table).await?;

        let n = {
            let mut inserted = self.inserted.lock();
            *inserted += 1;
            *inserted
        };
        let created_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .map(|t| t + chrono::Duration::seconds(n))
            .unwrap_or_else(Utc::now);

        row.insert("id".to_string(), json!(uuid::Uuid::new_v4().to_string()));
        row.insert("created_at".to_string(), json!(created_at.to_rfc3339()));

        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<()> {
        self.enter("update", table).await?;

        let mut tables = self.tables.lock();
        if let Some(row) = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == Some(&json!(id))))
        {
            row.extend(patch);
        }
        Ok(())
    }

    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Row>> {
        self.enter("select", table).await?;

        let mut rows: Vec<Row> = self
            .rows(table)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect();

        if let Some((column, direction)) = &filter.order_by {
            rows.sort_by_key(|row| row.get(column).map(|v| v.to_string()).unwrap_or_default());
            if *direction == SortDirection::Descending {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    async fn remove(&self, table: &str, filter: &Filter) -> Result<()> {
        self.enter("remove", table).await?;

        if let Some(rows) = self.tables.lock().get_mut(table) {
            rows.retain(|row| !filter.matches(row));
        }
        Ok(())
    }

    async fn invoke_procedure(&self, name: &str, args: Value) -> Result<Value> {
        self.procedure_log.lock().push((name.to_string(), args));
        if self.should_fail {
            return Err(FormzError::Persistence(format!("procedure {} failed", name)));
        }

        Ok(self
            .procedure_responses
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Null))
    }
}

/// Remote SQL bridge that records every statement
pub struct MockSqlExecutor {
    pub failure: Option<String>,
    pub sql_log: Arc<parking_lot::Mutex<Vec<(SqlDialect, String)>>>,
}

impl MockSqlExecutor {
    pub fn new() -> Self {
        Self {
            failure: None,
            sql_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    /// Report every execution as failed with `error`
    pub fn with_failure(mut self, error: impl Into<String>) -> Self {
        self.failure = Some(error.into());
        self
    }

    pub fn sql_log(&self) -> Vec<(SqlDialect, String)> {
        self.sql_log.lock().clone()
    }
}

#[async_trait]
impl SqlExecutor for MockSqlExecutor {
    async fn execute(
        &self,
        _connection: &DatabaseConnection,
        dialect: SqlDialect,
        sql: &str,
    ) -> Result<ExecutionOutcome> {
        self.sql_log.lock().push((dialect, sql.to_string()));
        Ok(match &self.failure {
            Some(error) => ExecutionOutcome::failed(error.clone()),
            None => ExecutionOutcome::ok(),
        })
    }
}

pub fn test_connection(dialect: SqlDialect) -> DatabaseConnection {
    DatabaseConnection::new("warehouse", dialect)
        .at("db.internal", dialect.default_port())
        .database("forms")
        .credentials("formz", "hunter2")
}
