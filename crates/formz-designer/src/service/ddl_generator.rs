//! DDL generation for form schemas
//!
//! Generates CREATE TABLE and ALTER TABLE statements that store a form's
//! submissions in an external database. Dialect differences (identity
//! column, table guard, ALTER COLUMN syntax) come from `DialectInfo`.
//! Output is plain text; executing it is the caller's business.

use formz_core::{AlterColumnStyle, DialectInfo, SqlDialect, TableGuardStyle, get_dialect_info};

use crate::models::{ColumnMap, FormElement, FormElementType};

/// DDL Generator for creating SQL statements from form schemas
///
/// This is a stateless utility: all methods are associated functions that
/// take the schema as input.
pub struct DdlGenerator;

impl DdlGenerator {
    /// SQL column type of an element type in a dialect
    pub fn sql_type(element_type: FormElementType, dialect: SqlDialect) -> &'static str {
        use FormElementType as T;
        use SqlDialect as D;

        match element_type {
            T::Text | T::Email | T::Select | T::Radio | T::Url | T::IconSelect => match dialect {
                D::Postgresql | D::Mysql => "VARCHAR(255)",
                D::Mssql => "NVARCHAR(255)",
            },
            T::Textarea => match dialect {
                D::Postgresql | D::Mysql => "TEXT",
                D::Mssql => "NVARCHAR(MAX)",
            },
            T::Number | T::Slider => match dialect {
                D::Postgresql => "NUMERIC",
                D::Mysql | D::Mssql => "DECIMAL(18,2)",
            },
            // Multi-select: native array, JSON document, JSON text
            T::Checkbox => match dialect {
                D::Postgresql => "TEXT[]",
                D::Mysql => "JSON",
                D::Mssql => "NVARCHAR(MAX)",
            },
            T::Date => "DATE",
            T::Time => "TIME",
            T::Phone => match dialect {
                D::Postgresql | D::Mysql => "VARCHAR(20)",
                D::Mssql => "NVARCHAR(20)",
            },
            T::Toggle => match dialect {
                D::Postgresql | D::Mysql => "BOOLEAN",
                D::Mssql => "BIT",
            },
            T::Rating => match dialect {
                D::Postgresql => "INTEGER",
                D::Mysql | D::Mssql => "INT",
            },
        }
    }

    /// Generate CREATE TABLE statement
    ///
    /// Identity primary key first, then one column per element in schema
    /// order, each `NOT NULL` when required and `NULL` otherwise.
    pub fn generate_create_table(
        table_name: &str,
        elements: &[FormElement],
        dialect: SqlDialect,
    ) -> String {
        let info = get_dialect_info(dialect);
        let columns = ColumnMap::resolve(elements);

        let mut column_defs = Vec::with_capacity(elements.len() + 1);
        column_defs.push(format!("    {}", info.identity_column));
        column_defs.extend(
            elements
                .iter()
                .zip(columns.columns())
                .map(|(element, column)| {
                    format!("    {}", Self::generate_column_definition(column, element, dialect))
                }),
        );
        let body = column_defs.join(",\n");

        match info.table_guard {
            TableGuardStyle::IfNotExists => {
                format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n);", table_name, body)
            }
            TableGuardStyle::SysObjectsCheck => format!(
                "IF NOT EXISTS (SELECT * FROM sysobjects WHERE name='{}' AND xtype='U')\nBEGIN\n  CREATE TABLE {} (\n{}\n  )\nEND",
                table_name.replace('\'', "''"),
                table_name,
                body
            ),
        }
    }

    /// Generate ALTER TABLE statements bringing an existing table in line
    /// with the schema.
    ///
    /// Elements whose column is missing from `existing_columns` are added;
    /// the others get their type and nullability re-specified. Columns of
    /// elements no longer in the schema are left alone: this never emits
    /// DROP COLUMN. Column names compare case-insensitively.
    pub fn generate_alter_table<S: AsRef<str>>(
        table_name: &str,
        elements: &[FormElement],
        existing_columns: &[S],
        dialect: SqlDialect,
    ) -> Vec<String> {
        let info = get_dialect_info(dialect);
        let columns = ColumnMap::resolve(elements);
        let mut statements = Vec::new();

        for (element, column) in elements.iter().zip(columns.columns()) {
            let exists = existing_columns
                .iter()
                .any(|existing| existing.as_ref().eq_ignore_ascii_case(column));

            if exists {
                statements.extend(Self::generate_column_alterations(
                    table_name, column, element, &info,
                ));
            } else {
                statements.push(format!(
                    "ALTER TABLE {} {} {};",
                    table_name,
                    info.add_column_keyword,
                    Self::generate_column_definition(column, element, dialect)
                ));
            }
        }

        statements
    }

    /// `generate_alter_table` as one script, one statement per line
    pub fn generate_alter_script<S: AsRef<str>>(
        table_name: &str,
        elements: &[FormElement],
        existing_columns: &[S],
        dialect: SqlDialect,
    ) -> String {
        Self::generate_alter_table(table_name, elements, existing_columns, dialect).join("\n")
    }

    /// ALTER statements re-specifying type and nullability of one existing column
    fn generate_column_alterations(
        table: &str,
        column: &str,
        element: &FormElement,
        info: &DialectInfo,
    ) -> Vec<String> {
        let sql_type = Self::sql_type(element.element_type, info.dialect);

        match info.alter_column {
            // PostgreSQL changes type and nullability separately
            AlterColumnStyle::TypeThenNullability => {
                let nullability = if element.required {
                    "SET NOT NULL"
                } else {
                    "DROP NOT NULL"
                };
                vec![
                    format!("ALTER TABLE {} ALTER COLUMN {} TYPE {};", table, column, sql_type),
                    format!("ALTER TABLE {} ALTER COLUMN {} {};", table, column, nullability),
                ]
            }
            // MySQL re-specifies the entire column
            AlterColumnStyle::ModifyColumn => vec![format!(
                "ALTER TABLE {} MODIFY COLUMN {};",
                table,
                Self::generate_column_definition(column, element, info.dialect)
            )],
            AlterColumnStyle::AlterColumnInline => vec![format!(
                "ALTER TABLE {} ALTER COLUMN {};",
                table,
                Self::generate_column_definition(column, element, info.dialect)
            )],
        }
    }

    /// Generate column definition SQL (used in CREATE TABLE and ALTER TABLE)
    fn generate_column_definition(
        column: &str,
        element: &FormElement,
        dialect: SqlDialect,
    ) -> String {
        let nullability = if element.required { "NOT NULL" } else { "NULL" };
        format!(
            "{} {} {}",
            column,
            Self::sql_type(element.element_type, dialect),
            nullability
        )
    }
}
