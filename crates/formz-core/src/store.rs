//! Collaborator traits: the hosted row store and the remote SQL bridge
//!
//! Neither collaborator is implemented in this workspace. Services receive
//! them as `Arc<dyn ...>` so the UI host can plug in its data-store client,
//! and tests can plug in mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{DatabaseConnection, Result, SqlDialect};

/// A stored row: column name → JSON value
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Sort direction for [`Filter::order_by`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Row selection understood by every [`RowStore`]: equality predicates
/// combined with AND, plus an optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub equals: Vec<(String, serde_json::Value)>,
    pub order_by: Option<(String, SortDirection)>,
}

impl Filter {
    /// Match every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder: add `column = value`
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.equals.push((column.into(), value.into()));
        self
    }

    /// Builder: order newest/largest first
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some((column.into(), SortDirection::Descending));
        self
    }

    /// Builder: order oldest/smallest first
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some((column.into(), SortDirection::Ascending));
        self
    }

    /// Whether a row satisfies every equality predicate
    pub fn matches(&self, row: &Row) -> bool {
        self.equals
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

/// The hosted data store
///
/// Every failed call is [`FormzError::Persistence`](crate::FormzError::Persistence);
/// a row that cannot be encoded is `Serialization`.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert a row and return it as stored (with generated `id`/`created_at`)
    async fn insert(&self, table: &str, row: Row) -> Result<Row>;

    /// Patch the row whose `id` equals `id`
    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<()>;

    /// Select rows matching `filter`
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Row>>;

    /// Remove rows matching `filter`
    async fn remove(&self, table: &str, filter: &Filter) -> Result<()>;

    /// Invoke a named remote procedure
    async fn invoke_procedure(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value>;
}

/// Result reported by the remote SQL bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Runs SQL text against a user-supplied external database
///
/// SQL the database rejects comes back as a failed [`ExecutionOutcome`].
/// `Err(FormzError::Persistence)` means the bridge itself could not be reached.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn execute(
        &self,
        connection: &DatabaseConnection,
        dialect: SqlDialect,
        sql: &str,
    ) -> Result<ExecutionOutcome>;
}
