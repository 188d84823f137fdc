//! SQL dialect metadata
//!
//! Forms can be published to three external database families. Everything
//! the DDL generator needs to know about a target (identity column syntax,
//! how `CREATE TABLE` is guarded, how an existing column is altered) lives
//! in [`DialectInfo`] so the generator itself never matches on vendor names.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{EnumIter, IntoEnumIterator};

/// SQL target a form table can be generated for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Postgresql,
    Mysql,
    Mssql,
}

impl SqlDialect {
    /// Create from a driver or dialect name. Unknown names fall back to PostgreSQL.
    pub fn from_driver_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => SqlDialect::Postgresql,
            "mysql" | "mariadb" => SqlDialect::Mysql,
            "mssql" | "sqlserver" | "sql_server" => SqlDialect::Mssql,
            _ => SqlDialect::Postgresql,
        }
    }

    /// Parse a dialect name strictly
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(SqlDialect::Postgresql),
            "mysql" | "mariadb" => Some(SqlDialect::Mysql),
            "mssql" | "sqlserver" | "sql_server" => Some(SqlDialect::Mssql),
            _ => None,
        }
    }

    /// Identifier used in persisted documents and RPC payloads
    pub fn id(&self) -> &'static str {
        match self {
            SqlDialect::Postgresql => "postgresql",
            SqlDialect::Mysql => "mysql",
            SqlDialect::Mssql => "mssql",
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SqlDialect::Postgresql => "PostgreSQL",
            SqlDialect::Mysql => "MySQL",
            SqlDialect::Mssql => "Microsoft SQL Server",
        }
    }

    /// Default TCP port of the database server
    pub fn default_port(&self) -> u16 {
        match self {
            SqlDialect::Postgresql => 5432,
            SqlDialect::Mysql => 3306,
            SqlDialect::Mssql => 1433,
        }
    }

    /// All supported dialects
    pub fn all() -> impl Iterator<Item = SqlDialect> {
        SqlDialect::iter()
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// How `CREATE TABLE` is protected against an already existing table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableGuardStyle {
    /// `CREATE TABLE IF NOT EXISTS name (...)`
    IfNotExists,
    /// `IF NOT EXISTS (SELECT * FROM sysobjects ...) BEGIN CREATE TABLE ... END`
    SysObjectsCheck,
}

/// How an existing column's type and nullability are changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterColumnStyle {
    /// `ALTER COLUMN c TYPE t` followed by `SET NOT NULL` / `DROP NOT NULL`
    TypeThenNullability,
    /// `MODIFY COLUMN c t NULL|NOT NULL`
    ModifyColumn,
    /// `ALTER COLUMN c t NULL|NOT NULL`
    AlterColumnInline,
}

/// Complete dialect information used by DDL generation
#[derive(Debug, Clone)]
pub struct DialectInfo {
    /// Dialect the info describes
    pub dialect: SqlDialect,
    /// Identity primary key column definition
    pub identity_column: Cow<'static, str>,
    /// Keyword sequence used to add a column (`ADD COLUMN` or `ADD`)
    pub add_column_keyword: Cow<'static, str>,
    pub table_guard: TableGuardStyle,
    pub alter_column: AlterColumnStyle,
}

/// Get the dialect information for a dialect
pub fn get_dialect_info(dialect: SqlDialect) -> DialectInfo {
    match dialect {
        SqlDialect::Postgresql => DialectInfo {
            dialect,
            identity_column: Cow::Borrowed("id SERIAL PRIMARY KEY"),
            add_column_keyword: Cow::Borrowed("ADD COLUMN"),
            table_guard: TableGuardStyle::IfNotExists,
            alter_column: AlterColumnStyle::TypeThenNullability,
        },
        SqlDialect::Mysql => DialectInfo {
            dialect,
            identity_column: Cow::Borrowed("id INT AUTO_INCREMENT PRIMARY KEY"),
            add_column_keyword: Cow::Borrowed("ADD COLUMN"),
            table_guard: TableGuardStyle::IfNotExists,
            alter_column: AlterColumnStyle::ModifyColumn,
        },
        SqlDialect::Mssql => DialectInfo {
            dialect,
            identity_column: Cow::Borrowed("id INT IDENTITY(1,1) PRIMARY KEY"),
            add_column_keyword: Cow::Borrowed("ADD"),
            table_guard: TableGuardStyle::SysObjectsCheck,
            alter_column: AlterColumnStyle::AlterColumnInline,
        },
    }
}
